use crate::types::AbiType;

#[derive(Debug, Error, PartialEq)]
pub enum Error {
    #[error("type string {0:?} is malformed")]
    TypeMalformed(String),

    #[error("could not parse length segment {0:?}")]
    CouldNotParseLength(String),

    #[error("calldata does not match the selector of {0:?}")]
    FunctionSignatureMismatch(String),

    #[error("log does not match the signature of event {0:?}")]
    DoesNotMatchSignature(String),

    #[error("decoded string is not valid UTF-8")]
    InvalidUtf8String,

    #[error("type {0} is not supported here")]
    TypeNotSupported(AbiType),

    #[error("no associated type found for {0}")]
    AssociatedTypeNotFound(AbiType),

    #[error("could not decode type {0} from {1:?}")]
    CouldNotDecodeType(AbiType, String),

    #[error("input data is invalid")]
    InvalidData,

    #[error("unexpected end of data at offset {0}")]
    UnexpectedEnd(usize),

    #[error("hex decoding error : {0}")]
    Hex(#[from] hex::FromHexError),
}
