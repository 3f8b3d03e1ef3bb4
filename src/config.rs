//! Writer configuration: the builder-style knobs of spec §2.3 / §6.

/// Tunables for `create`/`create_multi`. Construct with `WriterConfig::default()`
/// and chain the `with_*` setters, mirroring the teacher crate's
/// `with_compression`/`with_max_concurrent` fluent style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriterConfig {
    utf8_names: bool,
    output_buffer_size: usize,
    copy_buffer_size: usize,
}

const DEFAULT_OUTPUT_BUFFER_SIZE: usize = 4 * 1024 * 1024;
const DEFAULT_COPY_BUFFER_SIZE: usize = 1024 * 1024;

impl WriterConfig {
    /// Sets general-purpose bit 11 on non-ghost entries and warrants the
    /// caller's archive names are valid UTF-8. Default `false`.
    pub fn with_utf8_names(mut self, utf8_names: bool) -> Self {
        self.utf8_names = utf8_names;
        self
    }

    /// Capacity of the buffered sink wrapping the output file. Default 4 MiB.
    pub fn with_output_buffer_size(mut self, size: usize) -> Self {
        self.output_buffer_size = size;
        self
    }

    /// Capacity of the reusable scratch buffer the entry writer streams
    /// source files through. Default 1 MiB.
    pub fn with_copy_buffer_size(mut self, size: usize) -> Self {
        self.copy_buffer_size = size;
        self
    }

    pub fn utf8_names(&self) -> bool {
        self.utf8_names
    }

    pub fn output_buffer_size(&self) -> usize {
        self.output_buffer_size
    }

    pub fn copy_buffer_size(&self) -> usize {
        self.copy_buffer_size
    }
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            utf8_names: false,
            output_buffer_size: DEFAULT_OUTPUT_BUFFER_SIZE,
            copy_buffer_size: DEFAULT_COPY_BUFFER_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_spec() {
        let cfg = WriterConfig::default();
        assert!(!cfg.utf8_names());
        assert_eq!(cfg.output_buffer_size(), 4 * 1024 * 1024);
        assert_eq!(cfg.copy_buffer_size(), 1024 * 1024);
    }

    #[test]
    fn builder_chains() {
        let cfg = WriterConfig::default()
            .with_utf8_names(true)
            .with_output_buffer_size(8192)
            .with_copy_buffer_size(4096);
        assert!(cfg.utf8_names());
        assert_eq!(cfg.output_buffer_size(), 8192);
        assert_eq!(cfg.copy_buffer_size(), 4096);
    }
}
