//! Testing utilities for logging
//!
//! [`CaptureWriter`] stands in for stdout/stderr so tests can assert on the
//! exact lines a handler produced.

use std::io;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

/// In-memory writer shared between a layer and the test that inspects it
#[derive(Debug, Clone, Default)]
pub struct CaptureWriter {
	buffer: Arc<Mutex<Vec<u8>>>,
}

impl CaptureWriter {
	pub fn new() -> Self {
		Self::default()
	}

	fn buffer(&self) -> MutexGuard<'_, Vec<u8>> {
		self.buffer.lock().unwrap_or_else(|e| e.into_inner())
	}

	/// Everything written so far, lossily decoded
	pub fn contents(&self) -> String {
		String::from_utf8_lossy(&self.buffer()).into_owned()
	}

	/// Written output split into non-empty lines
	pub fn lines(&self) -> Vec<String> {
		self.contents()
			.lines()
			.filter(|l| !l.is_empty())
			.map(str::to_string)
			.collect()
	}

	/// Box a clone of this writer for use with the handler builders
	pub fn boxed(&self) -> BoxMakeWriter {
		BoxMakeWriter::new(self.clone())
	}
}

impl io::Write for CaptureWriter {
	fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
		self.buffer().extend_from_slice(buf);
		Ok(buf.len())
	}

	fn flush(&mut self) -> io::Result<()> {
		Ok(())
	}
}

impl<'a> MakeWriter<'a> for CaptureWriter {
	type Writer = CaptureWriter;

	fn make_writer(&'a self) -> Self::Writer {
		self.clone()
	}
}
