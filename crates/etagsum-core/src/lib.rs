pub mod config;
pub mod logging;

pub mod codec;
pub mod digest;
pub mod error;
pub mod generate;
pub mod size;
pub mod source;
pub mod verify;

pub use codec::{ChecksumRecord, ParsedLine};
pub use digest::{ChunkedDigest, Etag};
pub use error::{InvalidChunkSize, MalformedLine, Unreadable};
pub use generate::{generate, plan_groups, run_groups, SizeGroup};
pub use source::{ByteStream, FsSource, StreamSource, STDIN_TARGET};
pub use verify::{check_line, CheckOptions, LineOutcome, VerificationTally, Verifier};
