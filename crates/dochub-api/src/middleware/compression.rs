//! Response compression layer.

use tower_http::compression::CompressionLayer;

/// Gzip compression for screen descriptions and downloads.
pub fn build_compression_layer() -> CompressionLayer {
    CompressionLayer::new().gzip(true)
}
