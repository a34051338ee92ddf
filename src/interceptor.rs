//! Request and response interceptors.
//!
//! Interceptors run for every request, in registration order, with no way
//! to short-circuit: request interceptors before the matched handler,
//! response interceptors after it.

use std::future::Future;
use std::sync::Arc;

use crate::error::HandlerError;
use crate::handler::{BoxFuture, HandlerInput};
use crate::response::{Response, ResponseBuilder};

/// Result type for interceptor callbacks.
pub type InterceptorResult = std::result::Result<(), HandlerError>;

/// Runs before the matched handler.
pub trait RequestInterceptor: Send + Sync + 'static {
    fn process(&self, input: HandlerInput) -> BoxFuture<'static, InterceptorResult>;
}

/// Runs after the matched handler produced a response.
pub trait ResponseInterceptor: Send + Sync + 'static {
    fn process(&self, input: HandlerInput, output: Response)
        -> BoxFuture<'static, InterceptorResult>;
}

type RequestFn =
    Arc<dyn Fn(HandlerInput, ResponseBuilder) -> BoxFuture<'static, InterceptorResult> + Send + Sync>;

type ResponseFn =
    Arc<dyn Fn(HandlerInput, Response) -> BoxFuture<'static, InterceptorResult> + Send + Sync>;

/// Request interceptor wrapping an async callback.
pub struct FnRequestInterceptor {
    callback: RequestFn,
}

impl RequestInterceptor for FnRequestInterceptor {
    fn process(&self, input: HandlerInput) -> BoxFuture<'static, InterceptorResult> {
        let res = input.response_builder();
        (self.callback)(input, res)
    }
}

/// Response interceptor wrapping an async callback.
pub struct FnResponseInterceptor {
    callback: ResponseFn,
}

impl ResponseInterceptor for FnResponseInterceptor {
    fn process(
        &self,
        input: HandlerInput,
        output: Response,
    ) -> BoxFuture<'static, InterceptorResult> {
        (self.callback)(input, output)
    }
}

/// Create a request interceptor. The callback receives the request context
/// and its response builder.
pub fn create_request_interceptor<F, Fut>(callback: F) -> FnRequestInterceptor
where
    F: Fn(HandlerInput, ResponseBuilder) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = InterceptorResult> + Send + 'static,
{
    FnRequestInterceptor {
        callback: Arc::new(
            move |input: HandlerInput,
                  res: ResponseBuilder|
                  -> BoxFuture<'static, InterceptorResult> {
                Box::pin(callback(input, res))
            },
        ),
    }
}

/// Create a response interceptor. The callback receives the request
/// context and the response the handler produced.
pub fn create_response_interceptor<F, Fut>(callback: F) -> FnResponseInterceptor
where
    F: Fn(HandlerInput, Response) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = InterceptorResult> + Send + 'static,
{
    FnResponseInterceptor {
        callback: Arc::new(
            move |input: HandlerInput, output: Response| -> BoxFuture<'static, InterceptorResult> {
                Box::pin(callback(input, output))
            },
        ),
    }
}
