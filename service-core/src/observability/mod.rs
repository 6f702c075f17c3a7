pub mod logging;
pub mod metrics;
pub mod trace_context;

pub use self::logging::init_tracing;
pub use self::metrics::{init_metrics, render_metrics};
pub use self::trace_context::{
    REQUEST_ID_HEADER, TRACEPARENT_HEADER, TracedClientExt, TracedRequest, extract_request_id,
    extract_traceparent, inject_trace_context, inject_trace_headers,
};
