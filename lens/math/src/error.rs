use std::any::type_name;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MathError {
    #[error("failed to parse `{input}` into {ty}: {reason}")]
    ParseNumber {
        ty: &'static str,
        input: String,
        reason: String,
    },

    #[error("addition overflow: {a} + {b} > {ty}::MAX")]
    OverflowAdd { ty: &'static str, a: String, b: String },

    #[error("subtraction overflow: {a} - {b} < {ty}::MIN")]
    OverflowSub { ty: &'static str, a: String, b: String },

    #[error("conversion overflow: {value} does not fit into {ty}")]
    OverflowConversion { ty: &'static str, value: String },

    #[error("division by zero: {a} / 0")]
    DivisionByZero { a: String },

    #[error("negative value {value} can't be converted into {ty}")]
    NegativeToUnsigned { ty: &'static str, value: String },
}

impl MathError {
    pub fn parse_number<T, I, R>(input: I, reason: R) -> Self
    where
        I: ToString,
        R: ToString,
    {
        Self::ParseNumber {
            ty: type_name::<T>(),
            input: input.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn overflow_add<T, A, B>(a: A, b: B) -> Self
    where
        A: ToString,
        B: ToString,
    {
        Self::OverflowAdd {
            ty: type_name::<T>(),
            a: a.to_string(),
            b: b.to_string(),
        }
    }

    pub fn overflow_sub<T, A, B>(a: A, b: B) -> Self
    where
        A: ToString,
        B: ToString,
    {
        Self::OverflowSub {
            ty: type_name::<T>(),
            a: a.to_string(),
            b: b.to_string(),
        }
    }

    pub fn overflow_conversion<T, V>(value: V) -> Self
    where
        V: ToString,
    {
        Self::OverflowConversion {
            ty: type_name::<T>(),
            value: value.to_string(),
        }
    }

    pub fn division_by_zero<A>(a: A) -> Self
    where
        A: ToString,
    {
        Self::DivisionByZero { a: a.to_string() }
    }

    pub fn negative_to_unsigned<T, V>(value: V) -> Self
    where
        V: ToString,
    {
        Self::NegativeToUnsigned {
            ty: type_name::<T>(),
            value: value.to_string(),
        }
    }
}

pub type MathResult<T> = Result<T, MathError>;
