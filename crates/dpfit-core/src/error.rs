pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(
        "reference size must be positive, got {size_in_dp} dp and no usable design-size fallback is configured"
    )]
    InvalidReferenceSize { size_in_dp: f64 },

    #[error("engine not initialized: call Engine::initialize with a DeviceSnapshot first")]
    NotInitialized,
}
