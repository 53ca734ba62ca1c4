//! Host integration hooks for generated JavaScript.
//!
//! A [`Target`] decides how generated code talks to its host: where output
//! goes, how faults and exits are reported, how input lines are read, and
//! where the step machine may suspend. The generator only ever calls these
//! hooks; it never names a host API itself.

use crate::parser::Program;

/// Program properties some hooks depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Features {
    /// Some step bakes at a reading temperature.
    pub reads_input: bool,
}

impl Features {
    /// Scans a program for the features it uses.
    pub fn of(program: &Program) -> Self {
        Self {
            reads_input: program.reads_input(),
        }
    }
}

/// Code generation hooks for one host environment.
///
/// Expression arguments and results are JavaScript source fragments;
/// statement hooks return complete statements (or nothing).
pub trait Target {
    /// Whether recipe functions are `async` and calls are awaited.
    fn asynchronous(&self, features: &Features) -> bool;

    /// Statement writing `value` without a trailing newline.
    fn print(&self, value: &str) -> String;

    /// Statement writing `value` followed by a newline.
    fn println(&self, value: &str) -> String;

    /// Statement reporting a formatted runtime fault message.
    fn error(&self, message: &str) -> String;

    /// Statement reporting any other thrown value, cancellation included.
    fn unexpected_error(&self, error: &str) -> String;

    /// Statement ending the program with status `code`.
    fn exit(&self, code: &str) -> String;

    /// Expression yielding one input line, without its line terminator.
    fn read_line(&self) -> String;

    /// Statements at the start of every step-machine iteration.
    fn loop_prolog(&self) -> String {
        String::new()
    }

    /// Statements at the end of every step-machine iteration.
    fn loop_epilog(&self) -> String {
        String::new()
    }

    /// Statements run once at the start of every recipe call.
    fn func_prolog(&self) -> String {
        String::new()
    }

    /// Statements run once when the program finishes, however it finishes.
    fn teardown(&self, _features: &Features) -> String {
        String::new()
    }

    /// Final transform of the whole emitted program.
    fn at_last(&self, code: String, _features: &Features) -> String {
        code
    }
}

// ---------------------------------------------------------------------------
// Headless (Node.js console program)
// ---------------------------------------------------------------------------

/// Stand-alone Node.js script reading stdin and writing stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct HeadlessTarget;

/// Line reader shim: queues stdin lines and resolves `""` once input ends.
const HEADLESS_READLINE_SHIM: &str = "\
const rl = require(\"node:readline\").createInterface({input: process.stdin});
const lineQueue = [];
const lineWaiters = [];
let inputClosed = false;
rl.on(\"line\", (line) => {
  if (lineWaiters.length) lineWaiters.shift()(line);
  else lineQueue.push(line);
});
rl.on(\"close\", () => {
  inputClosed = true;
  while (lineWaiters.length) lineWaiters.shift()(\"\");
});
function readLine() {
  if (lineQueue.length) return Promise.resolve(lineQueue.shift());
  if (inputClosed) return Promise.resolve(\"\");
  return new Promise((resolve) => lineWaiters.push(resolve));
}
";

impl Target for HeadlessTarget {
    fn asynchronous(&self, features: &Features) -> bool {
        features.reads_input
    }

    fn print(&self, value: &str) -> String {
        format!("process.stdout.write(String({value}));")
    }

    fn println(&self, value: &str) -> String {
        format!("console.log({value});")
    }

    fn error(&self, message: &str) -> String {
        format!("console.error(\"Muffin error: \" + {message}); process.exitCode = 1;")
    }

    fn unexpected_error(&self, error: &str) -> String {
        format!("console.error(`Unexpected error: ${{{error}}}`); process.exitCode = 1;")
    }

    fn exit(&self, code: &str) -> String {
        format!("process.exit({code});")
    }

    fn read_line(&self) -> String {
        "await readLine()".to_string()
    }

    fn teardown(&self, features: &Features) -> String {
        if features.reads_input {
            "rl.close();".to_string()
        } else {
            String::new()
        }
    }

    fn at_last(&self, code: String, features: &Features) -> String {
        if features.reads_input {
            format!("{HEADLESS_READLINE_SHIM}(async () => {{\n{code}}})();\n")
        } else {
            code
        }
    }
}

// ---------------------------------------------------------------------------
// Interactive (embedded in a host page or worker)
// ---------------------------------------------------------------------------

/// Default number of steps one recipe call runs between suspensions.
pub const DEFAULT_YIELD_THRESHOLD: u32 = 10_000;

/// Async function expression driven by a host object.
///
/// The emitted program evaluates to `async (host) => { ... }`. The host
/// supplies `print(text)`, `error(message)`, `unexpectedError(value)`,
/// `exit(code)`, `readLine()` and `pause()` (both may return promises), and
/// a `CANCELLED` sentinel. When `pause()` or `readLine()` resolves to
/// `host.CANCELLED`, the program throws it and stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InteractiveTarget {
    /// Steps one recipe call runs before awaiting `host.pause()`.
    pub yield_threshold: u32,
}

impl InteractiveTarget {
    /// Creates a target pausing every `yield_threshold` steps. A threshold
    /// of 0 is raised to 1.
    pub fn new(yield_threshold: u32) -> Self {
        Self {
            yield_threshold: yield_threshold.max(1),
        }
    }
}

impl Default for InteractiveTarget {
    fn default() -> Self {
        Self::new(DEFAULT_YIELD_THRESHOLD)
    }
}

const INTERACTIVE_HELPERS: &str = "\
async function readLine() {
  const line = await host.readLine();
  if (line === host.CANCELLED) throw host.CANCELLED;
  return line;
}
async function pause() {
  if (await host.pause() === host.CANCELLED) throw host.CANCELLED;
}
";

impl Target for InteractiveTarget {
    fn asynchronous(&self, _features: &Features) -> bool {
        true
    }

    fn print(&self, value: &str) -> String {
        format!("host.print(String({value}));")
    }

    fn println(&self, value: &str) -> String {
        format!("host.print(String({value}) + \"\\n\");")
    }

    fn error(&self, message: &str) -> String {
        format!("host.error({message});")
    }

    fn unexpected_error(&self, error: &str) -> String {
        format!("host.unexpectedError({error});")
    }

    fn exit(&self, code: &str) -> String {
        format!("host.exit({code});")
    }

    fn read_line(&self) -> String {
        "await readLine()".to_string()
    }

    fn func_prolog(&self) -> String {
        "let c = 0;".to_string()
    }

    fn loop_epilog(&self) -> String {
        format!(
            "if (++c >= {}) {{ c = 0; await pause(); }}",
            self.yield_threshold
        )
    }

    fn at_last(&self, code: String, _features: &Features) -> String {
        format!("(async (host) => {{\n{INTERACTIVE_HELPERS}{code}}})\n")
    }
}
