//! Program tree to JavaScript emission.
//!
//! Every recipe becomes one function running a step machine: an instruction
//! pointer walks a `switch` over the step numbers until it leaves the range
//! or a `serves` step returns. Runtime faults are thrown as compact
//! `[recipe, step, message]` arrays and decoded once at the top level.

use serde_json::Value;
use tracing::{debug, trace};

use crate::codegen::ids::{Interner, KindId, MessageId, RecipeId};
use crate::codegen::target::{Features, Target};
use crate::parser::{
    Action, BowlKind, BowlRef, ENTRY_RECIPE, Ingredient, MixOp, MoldKind, MoldRef, Predicate,
    Program, Recipe, Step, Temperature,
};

/// Recipe function name prefix.
const FUNC: &str = "f";
/// Per-call bowl storage.
const BOWLS: &str = "b";
/// Program-wide mold storage.
const MOLDS: &str = "m";
/// Storage slot prefix for one bowl or mold kind.
const KIND: &str = "k";
/// Instruction pointer.
const IP: &str = "i";
/// Jump target set by the current step, if any.
const NEW_IP: &str = "I";
/// Caught fault in the top-level boundary.
const ERR: &str = "e";
/// Step-local scratch value.
const TMP: &str = "t";

// ---------------------------------------------------------------------------
// CodeGenerator
// ---------------------------------------------------------------------------

/// Stateful program walker that owns the id pools of one emission.
pub struct CodeGenerator<'a, T: Target + ?Sized> {
    program: &'a Program,
    target: &'a T,
    features: Features,
    asynchronous: bool,
    recipes: Interner<String, RecipeId>,
    bowl_kinds: Interner<BowlKind, KindId>,
    mold_kinds: Interner<MoldKind, KindId>,
    messages: Interner<String, MessageId>,
    recipe: RecipeId,
    step: usize,
}

impl<'a, T: Target + ?Sized> CodeGenerator<'a, T> {
    /// Creates a generator; recipe ids follow definition order.
    pub fn new(program: &'a Program, target: &'a T) -> Self {
        let features = Features::of(program);
        let mut recipes: Interner<String, RecipeId> = Interner::new();
        for (name, _) in program.iter() {
            recipes.intern(name.to_string());
        }

        Self {
            program,
            target,
            features,
            asynchronous: target.asynchronous(&features),
            recipes,
            bowl_kinds: Interner::new(),
            mold_kinds: Interner::new(),
            messages: Interner::new(),
            recipe: RecipeId::default(),
            step: 0,
        }
    }

    /// Emits the whole program.
    pub fn generate(mut self) -> String {
        debug!(
            recipes = self.program.len(),
            asynchronous = self.asynchronous,
            reads_input = self.features.reads_input,
            "generating program"
        );

        let mut out = String::new();
        line(&mut out, 0, &format!("const {MOLDS} = {{}};"));
        for (name, recipe) in self.program.iter() {
            self.emit_recipe(&mut out, name, recipe);
        }
        self.emit_entry(&mut out);

        let code = self.target.at_last(out, &self.features);
        debug!(
            bytes = code.len(),
            messages = self.messages.len(),
            "generated program"
        );
        code
    }

    // -----------------------------------------------------------------------
    // Recipes
    // -----------------------------------------------------------------------

    fn emit_recipe(&mut self, out: &mut String, name: &str, recipe: &Recipe) {
        self.recipe = self.recipes.intern(name.to_string());
        trace!(recipe = name, id = %self.recipe, steps = recipe.steps.len(), "emitting recipe");

        let prefix = if self.asynchronous { "async " } else { "" };
        line(out, 0, &format!("{prefix}function {FUNC}{}() {{", self.recipe));
        line(out, 1, &format!("const {BOWLS} = {{}};"));
        line(out, 1, &format!("let {IP} = 1;"));
        line(out, 1, &self.target.func_prolog());
        line(out, 1, &format!("while ({IP} <= {}) {{", recipe.steps.len()));
        line(out, 2, &format!("let {NEW_IP} = null;"));
        line(out, 2, &format!("let {TMP};"));
        line(out, 2, &self.target.loop_prolog());
        line(out, 2, &format!("switch ({IP}) {{"));
        for (index, step) in recipe.steps.iter().enumerate() {
            self.step = index + 1;
            let statement = self.emit_step(step);
            line(out, 3, &format!("case {}: {statement} break;", self.step));
        }
        line(out, 2, "}");
        line(out, 2, &self.target.loop_epilog());
        line(out, 2, &format!("if ({NEW_IP} == null) {IP}++; else {IP} = {NEW_IP};"));
        line(out, 1, "}");
        line(out, 1, "return 0;");
        line(out, 0, "}");
    }

    /// Emits the entry call wrapped in the fault boundary.
    fn emit_entry(&mut self, out: &mut String) {
        let call = self.call(ENTRY_RECIPE);
        let recipe_names = js_array(self.recipes.keys());
        let message_texts = js_array(self.messages.keys());
        let formatted = format!(
            "`in recipe \"${{{recipe_names}[{ERR}[0]]}}\", step ${{{ERR}[1]}}: ${{{message_texts}[{ERR}[2]]}}`"
        );

        line(out, 0, "try {");
        line(out, 1, &self.target.exit(&call));
        line(out, 0, &format!("}} catch ({ERR}) {{"));
        line(
            out,
            1,
            &format!("if ({ERR} instanceof Array) {{ {} }}", self.target.error(&formatted)),
        );
        line(
            out,
            1,
            &format!("else {{ {} }}", self.target.unexpected_error(ERR)),
        );
        let teardown = self.target.teardown(&self.features);
        if teardown.is_empty() {
            line(out, 0, "}");
        } else {
            line(out, 0, &format!("}} finally {{ {teardown} }}"));
        }
    }

    fn call(&mut self, recipe: &str) -> String {
        let id = self.recipes.intern(recipe.to_string());
        let wait = if self.asynchronous { "await " } else { "" };
        format!("{wait}{FUNC}{id}()")
    }

    // -----------------------------------------------------------------------
    // Steps
    // -----------------------------------------------------------------------

    fn emit_step(&mut self, step: &Step) -> String {
        let statement = self.emit_action(&step.action);
        match step.predicate {
            Some(predicate) => self.emit_predicate(predicate, &statement),
            None => statement,
        }
    }

    fn emit_predicate(&mut self, predicate: Predicate, inner: &str) -> String {
        match predicate {
            Predicate::BowlIsEmpty(bowl) => {
                self.acquire_bowl(bowl, |_, b| format!("if (!{b}) {{ {inner} }}"))
            }
            Predicate::BowlNotEmpty(bowl) => {
                self.acquire_bowl(bowl, |_, b| format!("if ({b}) {{ {inner} }}"))
            }
            Predicate::MoldIsEmpty(mold) => {
                self.acquire_mold(mold, |_, m| format!("if (!{m}.length) {{ {inner} }}"))
            }
            Predicate::MoldNotEmpty(mold) => {
                self.acquire_mold(mold, |_, m| format!("if ({m}.length) {{ {inner} }}"))
            }
        }
    }

    fn emit_action(&mut self, action: &Action) -> String {
        match action {
            Action::SetUpBowl { kind, count } => {
                let array = self.bowl_array(*kind);
                let fault = self.fault(&format!("bowl kind \"{}\" already set up", kind.name()));
                format!("if ({array}) {{ {fault} }} else {{ {array} = new Array({count}).fill(0); }}")
            }
            Action::SetUpMold { kind, count } => {
                let array = self.mold_array(*kind);
                let fault = self.fault(&format!("mold kind \"{}\" already set up", kind.name()));
                format!(
                    "if ({array}) {{ {fault} }} else {{ {array} = Array.from({{length: {count}}}, () => []); }}"
                )
            }
            Action::AddToBowl { amount, bowl } => {
                self.acquire_bowl(*bowl, |_, b| format!("{b} += {amount};"))
            }
            Action::RemoveFromBowl { amount, bowl } => {
                self.acquire_bowl(*bowl, |_, b| format!("{b} -= Math.min({b}, {amount});"))
            }
            Action::CleanBowl { bowl } => self.acquire_bowl(*bowl, |_, b| format!("{b} = 0;")),
            Action::AddWater { bowl, ratio } => {
                let factor = i128::from(*ratio) + 1;
                self.acquire_bowl(*bowl, |_, b| format!("{b} *= {factor};"))
            }
            Action::PourHalf { from, into } => self.acquire_bowl(*from, |this, b1| {
                this.acquire_bowl(*into, |_, b2| {
                    format!("{TMP} = Math.floor({b1} / 2); {b1} -= {TMP}; {b2} += {TMP};")
                })
            }),
            Action::PourAll { from, into } => self.acquire_bowl(*from, |this, b1| {
                this.acquire_bowl(*into, |_, b2| format!("{b2} += {b1}; {b1} = 0;"))
            }),
            Action::Jump { target } => format!("{NEW_IP} = {target};"),
            Action::Bake { bowl, temperature } => {
                self.acquire_bowl(*bowl, |this, b| this.emit_bake(b, *temperature))
            }
            Action::Serves { count } => format!("return {};", count - 1),
            Action::PushIngredient { mold, value } => {
                let literal = match value {
                    Ingredient::Number(number) => number.to_string(),
                    Ingredient::Text(text) => js_string(text),
                };
                self.acquire_mold(*mold, |_, m| format!("{m}.push({literal});"))
            }
            Action::PushBowl { mold, bowl } => self.acquire_bowl(*bowl, |this, b| {
                this.acquire_mold(*mold, |_, m| format!("{m}.push({b}); {b} = 0;"))
            }),
            Action::PushHalfBowl { mold, bowl } => self.acquire_bowl(*bowl, |this, b| {
                this.acquire_mold(*mold, |_, m| {
                    format!("{TMP} = Math.floor({b} / 2); {b} -= {TMP}; {m}.push({TMP});")
                })
            }),
            Action::Pop { mold } => self.acquire_mold(*mold, |this, m| {
                let fault = this.fault("cannot pop from empty mold");
                format!("if (!{m}.length) {{ {fault} }} else {{ {m}.pop(); }}")
            }),
            Action::PopInto { mold, bowl } => self.acquire_mold(*mold, |this, m| {
                this.acquire_bowl(*bowl, |this, b| {
                    let empty = this.fault("cannot pop from empty mold");
                    let string = this.fault("cannot store string value into bowl");
                    format!(
                        "if (!{m}.length) {{ {empty} }} \
                         else {{ {TMP} = {m}.pop(); \
                         if (typeof {TMP} == \"string\") {{ {string} }} else {{ {b} += {TMP}; }} }}"
                    )
                })
            }),
            Action::Microwave { mold } => self.acquire_mold(*mold, |this, m| {
                let fault = this.fault("cannot microwave empty mold");
                let print = this.target.println(&format!("{m}[{m}.length - 1]"));
                format!("if (!{m}.length) {{ {fault} }} else {{ {print} }}")
            }),
            Action::MicrowaveGrill { mold } => self.acquire_mold(*mold, |this, m| {
                let fault = this.fault("cannot microwave empty mold");
                let print = this.target.print(&format!("{m}.pop()"));
                format!("if (!{m}.length) {{ {fault} }} else {{ {print} }}")
            }),
            Action::Mix { mold, op } => self.emit_mix(*mold, *op),
            Action::ServeWith { recipe } => format!("{};", self.call(recipe)),
        }
    }

    /// Oven behavior for one temperature, with `b` the guarded bowl slot.
    fn emit_bake(&mut self, b: &str, temperature: Temperature) -> String {
        match temperature {
            Temperature::PrintNumber => self.target.println(b),
            Temperature::PrintChar => {
                let fault = self.fault("invalid code point");
                let print = self.target.print(&format!("String.fromCodePoint({b})"));
                format!("if ({b} < 0 || {b} >= 0x110000) {{ {fault} }} else {{ {print} }}")
            }
            Temperature::ReadNumber => {
                let fault = self.fault("input line is not a single integer");
                let read = self.target.read_line();
                format!(
                    "{TMP} = {read}; if (!/^\\s*[+-]?\\d+\\s*$/.test({TMP})) {{ {fault} }} \
                     else {{ {b} = parseInt({TMP}, 10); }}"
                )
            }
            Temperature::ReadChar => {
                let fault = self.fault("input line is not a single character");
                let read = self.target.read_line();
                format!(
                    "{TMP} = {read}; if ([...{TMP}].length != 1) {{ {fault} }} \
                     else {{ {b} = {TMP}.codePointAt(0); }}"
                )
            }
        }
    }

    /// Shared path of the binary mold operations: pops the two top layers
    /// into `t[0]` (top) and `t[1]` (second) and pushes one result.
    fn emit_mix(&mut self, mold: MoldRef, op: MixOp) -> String {
        self.acquire_mold(mold, |this, m| {
            let too_few = this.fault("not enough elements in mold to perform this step (2 needed)");
            let top = this.fault("top of mold is not a number");
            let second = this.fault("second top of mold is not a number");
            let (top_value, second_value) = (format!("{TMP}[0]"), format!("{TMP}[1]"));
            let result = match op {
                MixOp::Stir => format!(
                    "{m}.push(Math.floor(Math.random() * (Math.abs({second_value} - {top_value}) + 1)) \
                     + Math.min({second_value}, {top_value}));"
                ),
                MixOp::Sift => {
                    let zero = this.fault("cannot sift by zero");
                    format!(
                        "if ({top_value} == 0) {{ {zero} }} \
                         else {{ {m}.push(Math.floor({second_value} / {top_value})); }}"
                    )
                }
                MixOp::Whip => format!("{m}.push({second_value} * {top_value});"),
                MixOp::Boil => format!(
                    "{m}.push({second_value} - Math.min({second_value}, {top_value}));"
                ),
            };
            format!(
                "if ({m}.length < 2) {{ {too_few} }} \
                 {TMP} = [{m}.pop()]; if (typeof {top_value} == \"string\") {{ {top} }} \
                 {TMP}.push({m}.pop()); if (typeof {second_value} == \"string\") {{ {second} }} \
                 {result}"
            )
        })
    }

    // -----------------------------------------------------------------------
    // Guarded storage access
    // -----------------------------------------------------------------------

    fn bowl_array(&mut self, kind: BowlKind) -> String {
        format!("{BOWLS}.{KIND}{}", self.bowl_kinds.intern(kind))
    }

    fn mold_array(&mut self, kind: MoldKind) -> String {
        format!("{MOLDS}.{KIND}{}", self.mold_kinds.intern(kind))
    }

    fn acquire_bowl<F>(&mut self, bowl: BowlRef, body: F) -> String
    where
        F: FnOnce(&mut Self, &str) -> String,
    {
        let array = self.bowl_array(bowl.kind);
        self.acquire(array, bowl.kind.name(), bowl.ordinal, body)
    }

    fn acquire_mold<F>(&mut self, mold: MoldRef, body: F) -> String
    where
        F: FnOnce(&mut Self, &str) -> String,
    {
        let array = self.mold_array(mold.kind);
        self.acquire(array, mold.kind.name(), mold.ordinal, body)
    }

    /// Wraps `body` in the set-up and bounds checks for one storage slot.
    /// Ordinal 1 is in range whenever the kind is set up.
    fn acquire<F>(&mut self, array: String, kind: &str, ordinal: u32, body: F) -> String
    where
        F: FnOnce(&mut Self, &str) -> String,
    {
        let not_set_up = self.fault(&format!("\"{kind}\" not set up yet"));
        let mut code = format!("if (!{array}) {{ {not_set_up} }} ");
        if ordinal != 1 {
            let too_large = self.fault(&format!("id {ordinal} too large for \"{kind}\""));
            code.push_str(&format!(
                "else if ({array}.length < {ordinal}) {{ {too_large} }} "
            ));
        }
        let slot = format!("{array}[{}]", ordinal.saturating_sub(1));
        let inner = body(self, &slot);
        code.push_str(&format!("else {{ {inner} }}"));
        code
    }

    /// Statement throwing a fault attributed to the current step.
    fn fault(&mut self, message: &str) -> String {
        let message = self.messages.intern(message.to_string());
        format!("throw [{}, {}, {message}];", self.recipe, self.step)
    }
}

/// Appends one indented line; empty hook output is skipped.
fn line(out: &mut String, depth: usize, text: &str) {
    if text.is_empty() {
        return;
    }
    for _ in 0..depth {
        out.push_str("  ");
    }
    out.push_str(text);
    out.push('\n');
}

/// JavaScript string literal for arbitrary text.
pub(crate) fn js_string(text: &str) -> String {
    Value::String(text.to_string()).to_string()
}

fn js_array(items: &[String]) -> String {
    Value::Array(items.iter().cloned().map(Value::String).collect()).to_string()
}
