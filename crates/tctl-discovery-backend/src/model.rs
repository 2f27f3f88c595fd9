/// One polymorphic audit event as returned by `SearchEvents` (§6).
///
/// Only the `SsmRun` variant is consumed by this subsystem; every other
/// event type in the real audit log is represented by `Other` and
/// dropped during parsing (§4.4).
#[derive(Debug, Clone)]
pub enum Event {
    SsmRun(SsmRunEvent),
    Other,
}

/// The `SSMRun` event fields this subsystem consumes (§6).
#[derive(Debug, Clone, Default)]
pub struct SsmRunEvent {
    /// Raw event time, as delivered by the audit log. Empty means the
    /// source event carried no timestamp.
    pub time: String,
    pub code: String,
    pub instance_id: String,
    pub status: String,
    pub exit_code: i64,
    pub account_id: String,
    pub region: String,
    pub command_id: String,
    pub invocation_url: String,
    pub standard_error: String,
}
