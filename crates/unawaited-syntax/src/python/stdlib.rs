//! Hierarchy facts for standard-library types the annotator cannot see.

use crate::types::TypeRef;

const CONTEXT_MANAGER: &str = "contextlib.AbstractContextManager";

pub(crate) struct StdlibType {
    pub(crate) name: &'static str,
    pub(crate) supertypes: &'static [&'static str],
    pub(crate) members: &'static [&'static str],
}

const fn entry(
    name: &'static str,
    supertypes: &'static [&'static str],
    members: &'static [&'static str],
) -> StdlibType {
    StdlibType {
        name,
        supertypes,
        members,
    }
}

const STDLIB_TYPES: &[StdlibType] = &[
    entry(CONTEXT_MANAGER, &[], &["__enter__", "__exit__"]),
    entry("typing.ContextManager", &[CONTEXT_MANAGER], &[]),
    entry("typing.IO", &[CONTEXT_MANAGER], &["close", "read", "write"]),
    entry("typing.TextIO", &["typing.IO"], &[]),
    entry("typing.BinaryIO", &["typing.IO"], &[]),
    entry("io.IOBase", &[CONTEXT_MANAGER], &["close"]),
    entry("io.RawIOBase", &["io.IOBase"], &[]),
    entry("io.BufferedIOBase", &["io.IOBase"], &[]),
    entry("io.TextIOBase", &["io.IOBase"], &[]),
    entry("io.FileIO", &["io.RawIOBase"], &[]),
    entry("io.BytesIO", &["io.BufferedIOBase"], &[]),
    entry("io.BufferedReader", &["io.BufferedIOBase"], &[]),
    entry("io.BufferedWriter", &["io.BufferedIOBase"], &[]),
    entry("io.StringIO", &["io.TextIOBase"], &[]),
    entry("io.TextIOWrapper", &["io.TextIOBase"], &[]),
    entry("socket.socket", &[CONTEXT_MANAGER], &["close"]),
    entry("threading.Lock", &[CONTEXT_MANAGER], &["acquire", "release"]),
    entry("threading.RLock", &[CONTEXT_MANAGER], &["acquire", "release"]),
    entry("threading.Semaphore", &[CONTEXT_MANAGER], &["acquire", "release"]),
    entry("threading.Condition", &[CONTEXT_MANAGER], &["wait", "notify"]),
    entry("tempfile.TemporaryDirectory", &[CONTEXT_MANAGER], &["cleanup"]),
    entry("zipfile.ZipFile", &[CONTEXT_MANAGER], &["close"]),
    entry("tarfile.TarFile", &[CONTEXT_MANAGER], &["close"]),
    entry("sqlite3.Connection", &[CONTEXT_MANAGER], &["close", "commit"]),
    entry("subprocess.Popen", &[CONTEXT_MANAGER], &["wait", "kill"]),
    entry("concurrent.futures.Executor", &[CONTEXT_MANAGER], &["shutdown"]),
    entry(
        "concurrent.futures.ThreadPoolExecutor",
        &["concurrent.futures.Executor"],
        &[],
    ),
    entry(
        "concurrent.futures.ProcessPoolExecutor",
        &["concurrent.futures.Executor"],
        &[],
    ),
];

const STDLIB_FUNCTIONS: &[(&str, &str)] = &[
    ("builtins.open", "typing.IO"),
    ("io.open", "typing.IO"),
    ("tempfile.TemporaryFile", "typing.IO"),
    ("tempfile.NamedTemporaryFile", "typing.IO"),
    ("socket.create_connection", "socket.socket"),
    ("sqlite3.connect", "sqlite3.Connection"),
];

/// Looks up a standard-library type by qualified name.
pub(crate) fn stdlib_type(name: &str) -> Option<&'static StdlibType> {
    STDLIB_TYPES.iter().find(|entry| entry.name == name)
}

/// Returns the result type of calling a standard-library function.
pub(crate) fn stdlib_call_result(name: &str) -> Option<TypeRef> {
    STDLIB_FUNCTIONS
        .iter()
        .find(|(function, _)| *function == name)
        .map(|(_, result)| TypeRef::named(*result))
}
