//! Prometheus registry for verification outcomes.
use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};
use ticket_verify::VerificationStatus;

#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    verifications: IntCounterVec,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();
        let verifications = IntCounterVec::new(
            Opts::new("ticket_verifications_total", "Ticket verifications by outcome"),
            &["status"],
        )?;
        registry.register(Box::new(verifications.clone()))?;

        Ok(Self {
            registry,
            verifications,
        })
    }

    pub fn record(&self, status: VerificationStatus) {
        self.verifications
            .with_label_values(&[status.as_str()])
            .inc();
    }

    pub fn count(&self, status: VerificationStatus) -> u64 {
        self.verifications
            .with_label_values(&[status.as_str()])
            .get()
    }

    pub fn encode(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).to_string())
    }
}
