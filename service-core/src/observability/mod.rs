pub mod logging;
pub mod trace_context;

pub use logging::init_tracing;
pub use trace_context::{
    extract_traceparent, inject_trace_context, TracedClientExt, TracedRequest,
    TRACEPARENT_HEADER, TRACESTATE_HEADER,
};
