//! HTTP transport
//!
//! Exposes the engine as JSON-RPC-like calls over axum:
//! `POST /rpc` runs one operation, `GET /stats` reports key counts.

mod handlers;
mod server;

pub use handlers::{RpcRequest, RpcResponse};
pub use server::{router, run_web_server};
