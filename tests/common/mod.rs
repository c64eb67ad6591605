#![allow(dead_code)]

pub mod temp_files {
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Write `content` to a temp file with the given extension; removed on drop.
    pub fn create_temp_table(content: &str, ext: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new()
            .prefix("routeshim_test_")
            .suffix(&format!(".{ext}"))
            .tempfile()
            .unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    pub fn create_temp_yaml(content: &str) -> NamedTempFile {
        create_temp_table(content, "yaml")
    }

    pub fn create_temp_json(content: &str) -> NamedTempFile {
        create_temp_table(content, "json")
    }
}

pub mod database {
    use async_trait::async_trait;
    use routeshim::helpers::{SqlDatabase, Statement};
    use std::sync::Mutex;

    /// Records every batch it is asked to run.
    #[derive(Default)]
    pub struct RecordingDb {
        pub batches: Mutex<Vec<Vec<Statement>>>,
        pub fail_with: Option<String>,
    }

    impl RecordingDb {
        pub fn failing(message: &str) -> Self {
            Self {
                batches: Mutex::new(Vec::new()),
                fail_with: Some(message.to_string()),
            }
        }

        pub fn batches(&self) -> Vec<Vec<Statement>> {
            self.batches.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SqlDatabase for RecordingDb {
        async fn batch(&self, statements: Vec<Statement>) -> anyhow::Result<()> {
            if let Some(message) = &self.fail_with {
                anyhow::bail!("{message}");
            }
            self.batches.lock().unwrap().push(statements);
            Ok(())
        }
    }
}

pub mod log_capture {
    use std::io;
    use std::sync::{Arc, Mutex};
    use tracing::subscriber::DefaultGuard;

    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Thread-local JSON log capture for the lifetime of the value.
    pub struct CapturedLogs {
        buffer: Buffer,
        _guard: DefaultGuard,
    }

    impl CapturedLogs {
        pub fn start() -> Self {
            let buffer = Buffer::default();
            let writer = buffer.clone();
            let subscriber = tracing_subscriber::fmt()
                .json()
                .with_max_level(tracing::Level::DEBUG)
                .with_writer(move || writer.clone())
                .finish();
            let guard = tracing::subscriber::set_default(subscriber);
            Self {
                buffer,
                _guard: guard,
            }
        }

        pub fn contents(&self) -> String {
            String::from_utf8(self.buffer.0.lock().unwrap().clone()).unwrap()
        }
    }
}
