//! Common response envelope

use serde::{Deserialize, Serialize};

pub const SUCCESS: i32 = 1;
pub const FAILURE: i32 = -1;

/// Wraps every response body, success or failure
#[derive(Debug, Serialize, Deserialize)]
pub struct CommonResponse<T> {
    /// 1 on success, -1 on failure
    pub code: i32,
    pub message: String,
    pub body: Option<T>,
}

impl<T> CommonResponse<T> {
    pub fn success(message: impl Into<String>, body: T) -> Self {
        Self {
            code: SUCCESS,
            message: message.into(),
            body: Some(body),
        }
    }

    pub fn empty(message: impl Into<String>) -> Self {
        Self {
            code: SUCCESS,
            message: message.into(),
            body: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            code: FAILURE,
            message: message.into(),
            body: None,
        }
    }
}
