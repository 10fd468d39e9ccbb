//! Reconstruction pipeline configuration types

/// TIFF compression methods for the amplitude and phase outputs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TiffCompression {
    /// No compression (fastest, largest file)
    None,
    /// LZW compression
    Lzw,
    /// Deflate compression - fast level
    DeflateFast,
    /// Deflate compression - balanced
    DeflateBalanced,
    /// Deflate compression - best compression (slower)
    DeflateBest,
}

/// How reconstructed fields are stored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputEncoding {
    /// Raw values as 32-bit float samples
    Float32,
    /// Min-max scaled to the full 16-bit range, for viewers without float support
    Normalized16,
}

/// Configuration for a hologram reconstruction run
#[derive(Debug, Clone)]
pub struct ReconstructionConfig {
    /// Compression method to use for written fields
    pub compression: TiffCompression,
    /// Predictor value for compression (2 selects horizontal differencing)
    pub predictor: Option<u16>,
    /// Whether to check the acquisition geometry preconditions before reconstructing
    pub validate_geometry: bool,
    /// Whether to reject empty or oversized holograms
    pub validate_dimensions: bool,
    /// Largest accepted side length when dimension validation is on
    pub max_dimension: Option<usize>,
    /// Whether RAW holograms are demosaiced to luminance (true) or read as a plain mosaic (false)
    pub debayer: bool,
    /// Sample encoding of the written amplitude and phase
    pub output: OutputEncoding,
}

impl Default for ReconstructionConfig {
    fn default() -> Self {
        Self {
            compression: TiffCompression::None,
            predictor: None,
            validate_geometry: true,
            validate_dimensions: true,
            max_dimension: Some(16384),
            debayer: false,
            output: OutputEncoding::Float32,
        }
    }
}

impl ReconstructionConfig {
    pub fn builder() -> ReconstructionConfigBuilder {
        ReconstructionConfigBuilder::default()
    }
}

/// Builder for ReconstructionConfig
#[derive(Default)]
pub struct ReconstructionConfigBuilder {
    compression: Option<TiffCompression>,
    predictor: Option<Option<u16>>,
    validate_geometry: Option<bool>,
    validate_dimensions: Option<bool>,
    max_dimension: Option<Option<usize>>,
    debayer: Option<bool>,
    output: Option<OutputEncoding>,
}

impl ReconstructionConfigBuilder {
    pub fn compression(mut self, compression: TiffCompression) -> Self {
        self.compression = Some(compression);
        self
    }

    pub fn predictor(mut self, predictor: Option<u16>) -> Self {
        self.predictor = Some(predictor);
        self
    }

    pub fn validate_geometry(mut self, validate: bool) -> Self {
        self.validate_geometry = Some(validate);
        self
    }

    pub fn validate_dimensions(mut self, validate: bool) -> Self {
        self.validate_dimensions = Some(validate);
        self
    }

    pub fn max_dimension(mut self, max: Option<usize>) -> Self {
        self.max_dimension = Some(max);
        self
    }

    pub fn debayer(mut self, enable: bool) -> Self {
        self.debayer = Some(enable);
        self
    }

    pub fn output(mut self, encoding: OutputEncoding) -> Self {
        self.output = Some(encoding);
        self
    }

    pub fn build(self) -> ReconstructionConfig {
        let default = ReconstructionConfig::default();
        ReconstructionConfig {
            compression: self.compression.unwrap_or(default.compression),
            predictor: self.predictor.unwrap_or(default.predictor),
            validate_geometry: self.validate_geometry.unwrap_or(default.validate_geometry),
            validate_dimensions: self.validate_dimensions.unwrap_or(default.validate_dimensions),
            max_dimension: self.max_dimension.unwrap_or(default.max_dimension),
            debayer: self.debayer.unwrap_or(default.debayer),
            output: self.output.unwrap_or(default.output),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = ReconstructionConfig::builder()
            .compression(TiffCompression::DeflateBest)
            .predictor(Some(2))
            .validate_geometry(false)
            .max_dimension(None)
            .output(OutputEncoding::Normalized16)
            .build();

        assert_eq!(config.compression, TiffCompression::DeflateBest);
        assert_eq!(config.predictor, Some(2));
        assert!(!config.validate_geometry);
        assert_eq!(config.max_dimension, None);
        assert_eq!(config.output, OutputEncoding::Normalized16);
    }

    #[test]
    fn test_builder_keeps_defaults_for_unset_fields() {
        let config = ReconstructionConfig::builder().debayer(true).build();
        let default = ReconstructionConfig::default();

        assert!(config.debayer);
        assert_eq!(config.compression, default.compression);
        assert_eq!(config.validate_geometry, default.validate_geometry);
        assert_eq!(config.validate_dimensions, default.validate_dimensions);
        assert_eq!(config.max_dimension, default.max_dimension);
        assert_eq!(config.output, OutputEncoding::Float32);
    }
}
