use thiserror::Error;

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// This enum covers all failure modes of the reference usage analysis engine: boundary
/// validation of supplied identities, metadata resolution failures during traversal, and
/// unreadable or unsupported input units. Each variant provides enough context to decide
/// whether a failure invalidates one unit's analysis or the whole batch.
///
/// # Error Categories
///
/// ## Boundary Validation
/// - [`Error::Malformed`] - Empty or inconsistent identities supplied by the caller
///
/// ## Metadata Resolution
/// - [`Error::AssemblyNotFound`] - The metadata reader cannot supply a requested assembly
/// - [`Error::TypeResolution`] - A base type, interface, or referenced type cannot be located
/// - [`Error::UnresolvedImport`] - No interop-origin candidate matches an embedded type copy
///
/// ## Input Classification
/// - [`Error::NotSupported`] - The unit is not a readable CLR assembly; callers should present
///   "not analyzable" rather than "no unused references found"
///
/// ## I/O and External Errors
/// - [`Error::FileError`] - Filesystem I/O errors raised by reader implementations
///
/// # Propagation Policy
///
/// Strategies and algorithms raise these errors; the narrowing protocol propagates them for
/// the unit under analysis; the batch driver in [`crate::analysis::batch`] catches per unit
/// and continues with the remaining units. Nothing is retried: metadata resolution is
/// deterministic, so a retry cannot change the outcome.
///
/// # Examples
///
/// ```rust,ignore
/// use refscope::{Error, analysis::ReferenceAnalyzer};
///
/// match analyzer.analyze(&unit, candidates) {
///     Ok(report) => println!("{} unused references", report.unused.len()),
///     Err(Error::UnresolvedImport { type_name }) => {
///         eprintln!("cannot prove liveness: unresolved import '{}'", type_name);
///     }
///     Err(Error::NotSupported) => eprintln!("not a CLR assembly"),
///     Err(e) => eprintln!("analysis failed: {}", e),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// The supplied input is inconsistent or fails boundary validation.
    ///
    /// Raised immediately at the API boundary for malformed identities (empty assembly
    /// names, empty type names, invalid display-name strings) before any traversal state
    /// is created. The error includes the source location where the problem was detected.
    ///
    /// # Fields
    ///
    /// * `message` - Detailed description of what was malformed
    /// * `file` - Source file where the error was detected
    /// * `line` - Source line where the error was detected
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// The message to be printed for the Malformed error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// The unit is not a supported CLR assembly.
    ///
    /// Surfaced distinctly from resolution failures so a caller can report the unit as
    /// "not analyzable" instead of concluding that it has no unused references.
    #[error("This file type is not supported")]
    NotSupported,

    /// The metadata reader could not supply an assembly for the given identity.
    ///
    /// The associated value is the display name of the assembly that was requested.
    /// Raised when the manifest or a type identity names an assembly the reader has
    /// no metadata for.
    #[error("Failed to locate assembly metadata - {0}")]
    AssemblyNotFound(String),

    /// A type required by the traversal could not be resolved.
    ///
    /// Raised when a base type, an implemented interface, or a referenced type named by
    /// a member signature or attribute argument cannot be located among the supplied
    /// metadata, and when a base-type chain revisits one of its own entries. This is
    /// never swallowed: an unresolvable type falsifies the liveness computation for
    /// every reference it might have touched.
    ///
    /// # Fields
    ///
    /// * `type_name` - Qualified identity of the type that failed to resolve
    /// * `context` - The strategy or algorithm that required the type
    #[error("Failed to resolve type '{type_name}' during {context}")]
    TypeResolution {
        /// Qualified name of the type that could not be resolved
        type_name: String,
        /// Name of the strategy or algorithm that needed the type
        context: &'static str,
    },

    /// No interop-origin candidate assembly matches an imported type.
    ///
    /// An embedded type-equivalent copy (COM/interop type embedding) could not be matched
    /// to its authoritative origin among the candidate assemblies. This is reported rather
    /// than ignored because the true liveness of some reference is indeterminate without
    /// the match.
    #[error("Unable to locate the origin assembly of imported type '{type_name}'")]
    UnresolvedImport {
        /// Qualified name of the embedded type whose origin could not be found
        type_name: String,
    },

    /// File I/O error.
    ///
    /// Wraps standard I/O errors raised by metadata reader implementations that access
    /// the filesystem.
    #[error("{0}")]
    FileError(#[from] std::io::Error),

    /// Generic error for miscellaneous failures.
    ///
    /// Used for errors that don't fit into other categories or for wrapping collaborator
    /// errors with additional context.
    #[error("{0}")]
    Error(String),
}
