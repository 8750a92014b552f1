//! Decides whether an action is a compile step and recovers its source and
//! output arguments from the raw command line.

// ---------------------------------------------------------------------------
// CompileKind
// ---------------------------------------------------------------------------

/// The compile mnemonics Bazel emits for C-family sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompileKind {
    Cpp,
    Objc,
    Cuda,
}

impl CompileKind {
    pub fn from_mnemonic(mnemonic: &str) -> Option<Self> {
        match mnemonic {
            "CppCompile" => Some(CompileKind::Cpp),
            "ObjcCompile" => Some(CompileKind::Objc),
            "CudaCompile" => Some(CompileKind::Cuda),
            _ => None,
        }
    }

    /// Lowercase source extensions, without the leading dot.
    pub fn source_extensions(&self) -> &'static [&'static str] {
        match self {
            CompileKind::Cpp => &["c", "cc", "cpp", "cxx", "c++"],
            CompileKind::Objc => &["c", "cc", "cpp", "cxx", "c++", "m", "mm"],
            CompileKind::Cuda => &["cu", "cc", "cpp"],
        }
    }

    fn is_source(&self, arg: &str) -> bool {
        let lower = arg.to_lowercase();
        self.source_extensions().iter().any(|ext| {
            lower
                .strip_suffix(ext)
                .is_some_and(|stem| stem.ends_with('.'))
        })
    }
}

// ---------------------------------------------------------------------------
// SourceOutput (classification result)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceOutput {
    pub kind: CompileKind,
    pub source: String,
    pub output: String,
}

// ---------------------------------------------------------------------------
// Output rules
// ---------------------------------------------------------------------------

/// A fn-pointer output rule. `extract` looks at the argument at `index` and
/// may consume the following argument too.
struct OutputRule {
    id: &'static str,
    extract: for<'a> fn(&'a [String], usize) -> Option<&'a str>,
}

/// Evaluated in order for every argument; the first rule that yields a value
/// ends the scan.
const OUTPUT_RULES: &[OutputRule] = &[
    OutputRule {
        id: "separate",
        extract: separate_output,
    },
    OutputRule {
        id: "attached",
        extract: attached_output,
    },
    OutputRule {
        id: "long_equals",
        extract: long_equals_output,
    },
    OutputRule {
        id: "msvc",
        extract: msvc_output,
    },
];

fn next_arg(args: &[String], index: usize) -> Option<&str> {
    args.get(index + 1).map(String::as_str)
}

/// `-o out.o` / `--output out.o`
fn separate_output(args: &[String], index: usize) -> Option<&str> {
    match args[index].as_str() {
        "-o" | "--output" => next_arg(args, index),
        _ => None,
    }
}

/// `-oout.o`
fn attached_output(args: &[String], index: usize) -> Option<&str> {
    args[index].strip_prefix("-o").filter(|rest| !rest.is_empty())
}

/// `--output=out.o`
fn long_equals_output(args: &[String], index: usize) -> Option<&str> {
    args[index]
        .strip_prefix("--output=")
        .filter(|rest| !rest.is_empty())
}

/// `/Foout.obj`, `-Foout.obj`, or `/Fo out.obj`
fn msvc_output(args: &[String], index: usize) -> Option<&str> {
    let arg = args[index].as_str();
    let rest = arg.strip_prefix("/Fo").or_else(|| arg.strip_prefix("-Fo"))?;
    if rest.is_empty() {
        next_arg(args, index)
    } else {
        Some(rest)
    }
}

// ---------------------------------------------------------------------------
// Detection
// ---------------------------------------------------------------------------

/// First non-flag argument carrying one of `kind`'s source extensions.
pub fn find_source(kind: CompileKind, args: &[String]) -> Option<&str> {
    args.iter()
        .map(String::as_str)
        .filter(|arg| !arg.is_empty() && !arg.starts_with('-'))
        .find(|arg| kind.is_source(arg))
}

/// The object file named by the first output flag on the command line.
///
/// A flag whose value is an empty argument still ends the scan, and the
/// action then has no output.
pub fn find_output(args: &[String]) -> Option<&str> {
    for (index, arg) in args.iter().enumerate() {
        if arg.is_empty() {
            continue;
        }
        for rule in OUTPUT_RULES {
            if let Some(output) = (rule.extract)(args, index) {
                tracing::trace!(rule = rule.id, output, "matched output flag");
                return Some(output).filter(|o| !o.is_empty());
            }
        }
    }
    None
}

/// Classify one action. Returns `None` for anything that is not a recognised
/// compile step with both a source and an output on its command line.
pub fn classify(mnemonic: &str, args: &[String]) -> Option<SourceOutput> {
    let kind = CompileKind::from_mnemonic(mnemonic)?;
    let source = find_source(kind, args)?;
    let output = find_output(args)?;
    Some(SourceOutput {
        kind,
        source: source.to_string(),
        output: output.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
