//! REST Client
//!
//! Generic JSON client over `window.fetch`, plus one module per backend
//! resource.

mod customers;
mod vehicles;
mod work_orders;
mod inventory;
mod services;
mod workers;
mod spendings;
mod summary;

pub use customers::*;
pub use vehicles::*;
pub use work_orders::*;
pub use inventory::*;
pub use services::*;
pub use workers::*;
pub use spendings::*;
pub use summary::*;

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, Request, RequestInit, Response};

use crate::config::Config;
use crate::error::{js_message, ApiError};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

fn browser_err(e: JsValue) -> ApiError {
    ApiError::Browser(js_message(&e))
}

/// Issue a request and return the response if its status is 2xx
async fn send(method: Method, path: &str, body: Option<String>, accept: &str) -> Result<Response, ApiError> {
    let url = Config::load().url(path);
    log::debug!("[API] {} {}", method.as_str(), url);

    let init = RequestInit::new();
    init.set_method(method.as_str());
    if let Some(body) = &body {
        init.set_body(&JsValue::from_str(body));
    }
    let request = Request::new_with_str_and_init(&url, &init).map_err(browser_err)?;
    let headers = request.headers();
    headers.set("Accept", accept).map_err(browser_err)?;
    if body.is_some() {
        headers.set("Content-Type", "application/json").map_err(browser_err)?;
    }

    let window = web_sys::window().ok_or_else(|| ApiError::Browser("no window".into()))?;
    let response: Response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| ApiError::Network(js_message(&e)))?
        .dyn_into()
        .map_err(|_| ApiError::Decode("fetch did not return a Response".into()))?;

    if response.ok() {
        return Ok(response);
    }
    let text = read_text(&response).await.unwrap_or_default();
    let err = ApiError::from_response(response.status(), &response.status_text(), &text);
    log::warn!("[API] {} {} -> {}", method.as_str(), url, err);
    Err(err)
}

async fn read_text(response: &Response) -> Result<String, ApiError> {
    let promise = response.text().map_err(browser_err)?;
    let value = JsFuture::from(promise).await.map_err(browser_err)?;
    Ok(value.as_string().unwrap_or_default())
}

/// Empty bodies (204) decode from `null`
fn decode<T: DeserializeOwned>(text: &str) -> Result<T, ApiError> {
    if text.trim().is_empty() {
        return serde_json::from_value(serde_json::Value::Null).map_err(ApiError::from);
    }
    serde_json::from_str(text).map_err(ApiError::from)
}

async fn request_json<T: DeserializeOwned>(method: Method, path: &str, body: Option<String>) -> Result<T, ApiError> {
    let response = send(method, path, body, "application/json").await?;
    let text = read_text(&response).await?;
    decode(&text)
}

fn encode_body<B: Serialize>(body: &B) -> Result<Option<String>, ApiError> {
    serde_json::to_string(body).map(Some).map_err(ApiError::from)
}

pub async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
    request_json(Method::Get, path, None).await
}

pub async fn post_json<B: Serialize, T: DeserializeOwned>(path: &str, body: &B) -> Result<T, ApiError> {
    request_json(Method::Post, path, encode_body(body)?).await
}

pub async fn put_json<B: Serialize, T: DeserializeOwned>(path: &str, body: &B) -> Result<T, ApiError> {
    request_json(Method::Put, path, encode_body(body)?).await
}

pub async fn patch_json<B: Serialize, T: DeserializeOwned>(path: &str, body: &B) -> Result<T, ApiError> {
    request_json(Method::Patch, path, encode_body(body)?).await
}

pub async fn delete(path: &str) -> Result<(), ApiError> {
    send(Method::Delete, path, None, "application/json").await?;
    Ok(())
}

/// Binary download (invoice PDFs)
pub async fn get_blob(path: &str, accept: &str) -> Result<Blob, ApiError> {
    let response = send(Method::Get, path, None, accept).await?;
    let promise = response.blob().map_err(browser_err)?;
    JsFuture::from(promise)
        .await
        .map_err(browser_err)?
        .dyn_into::<Blob>()
        .map_err(|_| ApiError::Decode("response body is not a blob".into()))
}

/// `search=brake pads` -> `search=brake%20pads`
pub fn query_string(params: &[(&str, &str)]) -> String {
    params
        .iter()
        .filter(|(_, v)| !v.is_empty())
        .map(|(k, v)| format!("{}={}", k, utf8_percent_encode(v, NON_ALPHANUMERIC)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Append a query string to a path when there is one
pub fn with_query(path: &str, params: &[(&str, &str)]) -> String {
    let qs = query_string(params);
    if qs.is_empty() {
        path.to_string()
    } else {
        format!("{}?{}", path, qs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_string_encodes_and_skips_empty() {
        assert_eq!(query_string(&[("search", "brake pads"), ("status", "")]), "search=brake%20pads");
        assert_eq!(with_query("metadata", &[("search", "")]), "metadata");
        assert_eq!(with_query("work-orders", &[("status", "in_progress")]), "work-orders?status=in%5Fprogress");
    }

    #[test]
    fn test_decode_empty_body() {
        decode::<()>("").unwrap();
        let none: Option<u32> = decode("  ").unwrap();
        assert_eq!(none, None);
        let nums: Vec<u32> = decode("[1,2]").unwrap();
        assert_eq!(nums, vec![1, 2]);
        assert!(matches!(decode::<Vec<u32>>("{"), Err(ApiError::Decode(_))));
    }
}
