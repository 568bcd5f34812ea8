//! Integration tests for the in-memory file input source against real files

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::rc::Rc;

    use memfile_source::logging::RecordingLogger;
    use memfile_source::{
        InMemoryFileConfig, InMemoryFileInputSource, InputSource, InputSourceError, LoadStrategy,
        Locator, SourceKind,
    };
    use tempfile::NamedTempFile;

    fn temp_file(contents: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("create temp file");
        file.write_all(contents).expect("write temp file");
        file.flush().expect("flush temp file");
        file
    }

    #[test]
    fn test_alphabet_walkthrough() {
        let file = temp_file(b"ABCDEFGHIJ");
        let mut source = InMemoryFileInputSource::new(file.path());
        source.open().expect("open");

        let mut buf = [0u8; 10];
        assert_eq!(source.read(&mut buf[..4]), 4);
        assert_eq!(&buf[..4], b"ABCD");
        assert_eq!(source.offset(), 4);

        assert!(source.seek_to_offset(8));
        assert_eq!(source.read(&mut buf), 2);
        assert_eq!(&buf[..2], b"IJ");
        assert_eq!(source.offset(), 10);

        assert_eq!(source.read(&mut buf[..1]), 0);
        assert!(source.at_eof());

        source.close().expect("close");
        assert_eq!(source.read(&mut buf[..1]), -1);
    }

    #[test]
    fn test_full_read_matches_file_contents() {
        let contents: Vec<u8> = (0..=255u8).cycle().take(64 * 1024 + 17).collect();
        let file = temp_file(&contents);
        let mut source = InMemoryFileInputSource::new(file.path());
        source.open().expect("open");
        assert_eq!(source.length(), contents.len() as i64);

        let mut out = Vec::new();
        let mut chunk = [0u8; 1000];
        loop {
            let n = source.read(&mut chunk);
            assert!(n >= 0);
            if n == 0 {
                break;
            }
            out.extend_from_slice(&chunk[..n as usize]);
        }
        assert_eq!(out, contents);
    }

    #[test]
    fn test_seek_to_end_and_beyond() {
        let file = temp_file(b"0123456789");
        let mut source = InMemoryFileInputSource::new(file.path());
        source.open().expect("open");

        assert!(source.seek_to_offset(3));
        assert!(!source.seek_to_offset(11));
        assert_eq!(source.offset(), 3);

        assert!(source.seek_to_offset(10));
        assert_eq!(source.read(&mut [0u8; 4]), 0);

        assert!(source.seek_to_offset(0));
        assert_eq!(source.offset(), 0);
    }

    #[test]
    fn test_never_opened_source_rejects_io() {
        let file = temp_file(b"abc");
        let mut source = InMemoryFileInputSource::new(file.path());

        assert!(!source.is_open());
        assert_eq!(source.read(&mut [0u8; 2]), -1);
        assert!(!source.seek_to_offset(0));
        assert_eq!(source.offset(), -1);
        assert_eq!(source.length(), -1);
        assert!(!source.at_eof());
    }

    #[test]
    fn test_close_twice_succeeds() {
        let file = temp_file(b"abc");
        let logger = Rc::new(RecordingLogger::new());
        let mut source =
            InMemoryFileInputSource::with_config(file.path(), InMemoryFileConfig::default(), Rc::clone(&logger));

        source.open().expect("open");
        assert!(source.close().is_ok());
        assert!(source.close().is_ok());
        assert!(!source.is_open());
        assert_eq!(logger.len(), 1);
    }

    #[test]
    fn test_file_url_locator() {
        let file = temp_file(b"url bytes");
        let url = url::Url::from_file_path(file.path()).expect("file url");
        let mut source = InMemoryFileInputSource::new(Locator::new(url.as_str()));

        source.open().expect("open via file url");
        assert_eq!(source.as_slice(), Some(&b"url bytes"[..]));
        assert_eq!(source.kind(), SourceKind::InMemoryFile);
        assert!(source.supports_seeking());
        assert_eq!(source.locator().as_str(), url.as_str());
    }

    #[test]
    fn test_missing_file_reports_enoent() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut source = InMemoryFileInputSource::new(dir.path().join("missing.flac"));

        let err = source.open().expect_err("missing file must fail");
        assert!(matches!(err, InputSourceError::Open { .. }));
        #[cfg(unix)]
        assert_eq!(err.code(), 2);
        assert!(!source.is_open());
    }

    #[test]
    fn test_relative_locator_is_unresolvable() {
        let mut source = InMemoryFileInputSource::new("some/relative/track.ogg");
        let err = source.open().expect_err("relative locator");
        assert!(matches!(err, InputSourceError::LocatorResolution { code: 5, .. }));
    }

    #[test]
    fn test_max_length_cap() {
        let file = temp_file(b"0123456789");
        let logger = Rc::new(RecordingLogger::new());
        let config = InMemoryFileConfig::default().with_max_length(9);
        let mut source = InMemoryFileInputSource::with_config(file.path(), config, logger);

        let err = source.open().expect_err("over cap");
        assert!(matches!(err, InputSourceError::Allocation { requested: 10, code: 27 }));
        assert!(!source.is_open());
    }

    #[test]
    fn test_single_read_strategy_on_regular_file() {
        let file = temp_file(b"regular files return everything in one read");
        let config = InMemoryFileConfig::default().with_load_strategy(LoadStrategy::SingleRead);
        let logger = Rc::new(RecordingLogger::new());
        let mut source = InMemoryFileInputSource::with_config(file.path(), config, Rc::clone(&logger));

        source.open().expect("open");
        assert_eq!(
            source.as_slice(),
            Some(&b"regular files return everything in one read"[..])
        );
        assert!(logger.is_empty());
    }

    #[test]
    fn test_loaded_bytes_survive_file_changes() {
        let mut file = temp_file(b"before");
        let mut source = InMemoryFileInputSource::new(file.path());
        source.open().expect("open");

        file.as_file_mut().set_len(0).expect("truncate");
        file.write_all(b"after!!!").expect("rewrite");
        file.flush().expect("flush");

        let mut buf = [0u8; 16];
        assert_eq!(source.read(&mut buf), 6);
        assert_eq!(&buf[..6], b"before");
    }
}
