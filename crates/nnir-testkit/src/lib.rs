//! Fixture builders that assemble minimal, well-formed [`nnir`] graphs for
//! unit tests.
//!
//! Each builder declares a fixed number of graph terminals and wires one
//! data-flow marker node to each, keeping the terminal tables and the node
//! arena mutually consistent so tests can attach the computation under test
//! between ready-made inputs and outputs.
//!
//! ```
//! use nnir::Module;
//! use nnir_testkit::IoFixture;
//!
//! let mut fx = IoFixture::new();
//! fx.init([1, 3, 4, 4].into(), [1, 3, 4, 4].into())?;
//! assert_eq!(fx.input()?.name(), "input_0");
//! assert_eq!(fx.output()?.name(), "output_0");
//!
//! let mut module = Module::new();
//! fx.transfer_to(&mut module)?;
//! assert_eq!(module.num_graphs(), 1);
//! # Ok::<(), nnir_testkit::FixtureError>(())
//! ```
//!
//! Fixtures are single-use, single-threaded test helpers; each test owns its
//! fixture exclusively.

use nnir::DType;
use thiserror::Error;

mod inputs;
mod io;
mod outputs;

pub use inputs::{InputFixture, InputsFixture};
pub use io::IoFixture;
pub use outputs::{OutputFixture, OutputsFixture};

/// Element type stamped on every terminal the fixtures produce.
///
/// A scope limitation of the toolkit, not an IR constraint.
pub const FIXTURE_DTYPE: DType = DType::F32;

/// Misuse of a fixture by the test author.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FixtureError {
    /// The shape sequence handed to `init` does not match the fixture's
    /// declared terminal count. Raised before any terminal or node is
    /// created, so the graph is left untouched.
    #[error("fixture declares {expected} terminal(s) but {got} shape(s) were supplied")]
    ShapeCountMismatch { expected: usize, got: usize },
    #[error("fixture is already initialized")]
    AlreadyInitialized,
    #[error("fixture is not initialized")]
    NotInitialized,
    #[error("graph was transferred to a module; fixture handles are stale")]
    Transferred,
}
