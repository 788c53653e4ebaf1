//! Bus transport (C9 transport half): a thin `rdkafka` producer/consumer
//! pair. Envelope decoding, dispatch, and DLQ routing are application logic
//! and live in `tb-consumer-lib`, not here — this crate only moves bytes.

pub mod consumer;
pub mod producer;

pub use consumer::{BusConsumer, MessageHandler};
pub use producer::Producer;
