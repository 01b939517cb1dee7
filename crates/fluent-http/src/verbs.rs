//! Terminal HTTP verbs

use std::future::Future;

use serde::Serialize;

use crate::response::{Response, Result};

/// The fixed verb set that sends a configured request
///
/// `get_with_query` flattens `query` into query string pairs. The body verbs
/// encode `params` with the request's current body format; pass `&()` for no
/// body.
pub trait HttpVerbs: Sized + Send {
    /// GET `url`
    fn get(self, url: &str) -> impl Future<Output = Result<Response>> + Send;

    /// GET `url` with extra query parameters
    fn get_with_query<Q>(self, url: &str, query: &Q) -> impl Future<Output = Result<Response>> + Send
    where
        Q: Serialize + ?Sized + Sync;

    /// POST `params` to `url`
    fn post<B>(self, url: &str, params: &B) -> impl Future<Output = Result<Response>> + Send
    where
        B: Serialize + ?Sized + Sync;

    /// PUT `params` to `url`
    fn put<B>(self, url: &str, params: &B) -> impl Future<Output = Result<Response>> + Send
    where
        B: Serialize + ?Sized + Sync;

    /// PATCH `params` to `url`
    fn patch<B>(self, url: &str, params: &B) -> impl Future<Output = Result<Response>> + Send
    where
        B: Serialize + ?Sized + Sync;

    /// DELETE `url`, with `params` as body
    fn delete<B>(self, url: &str, params: &B) -> impl Future<Output = Result<Response>> + Send
    where
        B: Serialize + ?Sized + Sync;
}
