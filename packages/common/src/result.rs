use crate::error::CommonError;

/// Result alias for file and serialization helpers
pub type CommonResult<T> = Result<T, CommonError>;
