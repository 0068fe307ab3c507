pub mod db;
pub mod health;
pub mod kv;
