/*
 * Responsibility
 * - /kv の request/response DTO
 */
use serde::{Deserialize, Serialize};

const MAX_VALUE_BYTES: usize = 64 * 1024;

#[derive(Debug, Deserialize)]
pub struct PutValueRequest {
    pub value: String,
}

impl PutValueRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.value.len() > MAX_VALUE_BYTES {
            return Err("value must be <= 64 KiB");
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct ValueResponse {
    pub key: String,
    pub value: String,
}
