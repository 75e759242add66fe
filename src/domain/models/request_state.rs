/// Guard for the single in-flight request. The typing indicator shown to the
/// user is derived from this rather than tracked separately.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum RequestState {
    #[default]
    Idle,
    Pending,
}

impl RequestState {
    pub fn is_pending(&self) -> bool {
        return *self == RequestState::Pending;
    }
}
