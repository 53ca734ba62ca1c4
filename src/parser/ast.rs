//! Parsed program tree.
//!
//! Ingredients never appear here: the parser substitutes their values at each
//! use site. Every step is an [`Action`] carrying exactly the operands its
//! opcode needs, optionally gated by a [`Predicate`].

use std::collections::HashMap;
use std::fmt;

/// Bowl kinds, i.e. the names of integer register banks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BowlKind {
    Bowl,
    GlassBowl,
    MixingBowl,
    PlasticBowl,
}

impl BowlKind {
    /// Every bowl kind in declaration order.
    pub const ALL: [Self; 4] = [
        Self::Bowl,
        Self::GlassBowl,
        Self::MixingBowl,
        Self::PlasticBowl,
    ];

    /// Singular source name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Bowl => "Bowl",
            Self::GlassBowl => "Glass Bowl",
            Self::MixingBowl => "Mixing Bowl",
            Self::PlasticBowl => "Plastic Bowl",
        }
    }

    /// Plural source name used by `set up <n> ...`.
    pub fn plural(self) -> &'static str {
        match self {
            Self::Bowl => "Bowls",
            Self::GlassBowl => "Glass Bowls",
            Self::MixingBowl => "Mixing Bowls",
            Self::PlasticBowl => "Plastic Bowls",
        }
    }

    /// Looks a kind up by its singular name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Looks a kind up by its plural name.
    pub fn from_plural(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.plural() == name)
    }
}

/// Mold kinds, i.e. the names of layer stack banks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoldKind {
    CakeMold,
    MuffinCup,
    LoafPan,
    ToastMold,
    PizzaPan,
    BakingDish,
}

impl MoldKind {
    /// Every mold kind in declaration order.
    pub const ALL: [Self; 6] = [
        Self::CakeMold,
        Self::MuffinCup,
        Self::LoafPan,
        Self::ToastMold,
        Self::PizzaPan,
        Self::BakingDish,
    ];

    /// Singular source name.
    pub fn name(self) -> &'static str {
        match self {
            Self::CakeMold => "Cake Mold",
            Self::MuffinCup => "Muffin Cup",
            Self::LoafPan => "Loaf Pan",
            Self::ToastMold => "Toast Mold",
            Self::PizzaPan => "Pizza Pan",
            Self::BakingDish => "Baking Dish",
        }
    }

    /// Plural source name used by `set up <n> ...`.
    pub fn plural(self) -> &'static str {
        match self {
            Self::CakeMold => "Cake Molds",
            Self::MuffinCup => "Muffin Cups",
            Self::LoafPan => "Loaf Pans",
            Self::ToastMold => "Toast Molds",
            Self::PizzaPan => "Pizza Pans",
            Self::BakingDish => "Baking Dishes",
        }
    }

    /// Looks a kind up by its singular name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Looks a kind up by its plural name.
    pub fn from_plural(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.plural() == name)
    }
}

/// `3rd Mixing Bowl`: one integer register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BowlRef {
    pub kind: BowlKind,
    /// 1-based index within the kind.
    pub ordinal: u32,
}

impl BowlRef {
    /// Creates a bowl reference.
    pub fn new(kind: BowlKind, ordinal: u32) -> Self {
        Self { kind, ordinal }
    }
}

/// `2nd Cake Mold`: one layer stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoldRef {
    pub kind: MoldKind,
    /// 1-based index within the kind.
    pub ordinal: u32,
}

impl MoldRef {
    /// Creates a mold reference.
    pub fn new(kind: MoldKind, ordinal: u32) -> Self {
        Self { kind, ordinal }
    }
}

/// Value of an ingredient, substituted at its use sites.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ingredient {
    Number(i64),
    Text(String),
}

/// The four oven settings `bake` understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Temperature {
    /// `190C`: print the bowl as a decimal number and a newline.
    PrintNumber,
    /// `425F`: print the bowl as one Unicode character.
    PrintChar,
    /// `230C`: read one line holding an integer into the bowl.
    ReadNumber,
    /// `350F`: read one line holding one character into the bowl.
    ReadChar,
}

impl Temperature {
    /// Every temperature in declaration order.
    pub const ALL: [Self; 4] = [
        Self::PrintNumber,
        Self::PrintChar,
        Self::ReadNumber,
        Self::ReadChar,
    ];

    /// Source literal for the temperature.
    pub fn code(self) -> &'static str {
        match self {
            Self::PrintNumber => "190C",
            Self::PrintChar => "425F",
            Self::ReadNumber => "230C",
            Self::ReadChar => "350F",
        }
    }

    /// Parses a temperature literal such as `"230C"`.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|temperature| temperature.code() == code)
    }

    /// Returns `true` for the settings that consume input.
    pub fn reads_input(self) -> bool {
        matches!(self, Self::ReadNumber | Self::ReadChar)
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Binary operations on the top two layers of a mold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MixOp {
    /// Random integer between the two values, inclusive.
    Stir,
    /// Second-from-top divided by top, floored.
    Sift,
    /// Product.
    Whip,
    /// Second-from-top minus top, floored at zero.
    Boil,
}

/// One step opcode with its operands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SetUpBowl { kind: BowlKind, count: u32 },
    SetUpMold { kind: MoldKind, count: u32 },
    AddToBowl { amount: i64, bowl: BowlRef },
    RemoveFromBowl { amount: i64, bowl: BowlRef },
    CleanBowl { bowl: BowlRef },
    /// `add water to <bowl> at a 1:<ratio> ratio`
    AddWater { bowl: BowlRef, ratio: i64 },
    PourHalf { from: BowlRef, into: BowlRef },
    PourAll { from: BowlRef, into: BowlRef },
    Jump { target: usize },
    Bake { bowl: BowlRef, temperature: Temperature },
    Serves { count: i64 },
    PushIngredient { mold: MoldRef, value: Ingredient },
    PushBowl { mold: MoldRef, bowl: BowlRef },
    PushHalfBowl { mold: MoldRef, bowl: BowlRef },
    Pop { mold: MoldRef },
    PopInto { mold: MoldRef, bowl: BowlRef },
    Microwave { mold: MoldRef },
    MicrowaveGrill { mold: MoldRef },
    Mix { mold: MoldRef, op: MixOp },
    ServeWith { recipe: String },
}

/// Emptiness test gating a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate {
    BowlIsEmpty(BowlRef),
    BowlNotEmpty(BowlRef),
    MoldIsEmpty(MoldRef),
    MoldNotEmpty(MoldRef),
}

/// One numbered instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub action: Action,
    pub predicate: Option<Predicate>,
}

impl Step {
    /// Creates a step.
    pub fn new(action: Action, predicate: Option<Predicate>) -> Self {
        Self { action, predicate }
    }
}

/// A named subroutine: steps in label order (step `n` is `steps[n - 1]`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Recipe {
    pub steps: Vec<Step>,
}

/// Name-indexed recipes in definition order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Program {
    recipes: Vec<(String, Recipe)>,
    index: HashMap<String, usize>,
}

impl Program {
    /// Creates an empty program.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a recipe. Returns `false` and leaves the program untouched when
    /// the name is already taken.
    pub fn insert(&mut self, name: impl Into<String>, recipe: Recipe) -> bool {
        let name = name.into();
        if self.index.contains_key(&name) {
            return false;
        }
        self.index.insert(name.clone(), self.recipes.len());
        self.recipes.push((name, recipe));
        true
    }

    /// Returns `true` when a recipe with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Looks a recipe up by name.
    pub fn get(&self, name: &str) -> Option<&Recipe> {
        self.index.get(name).map(|&position| &self.recipes[position].1)
    }

    /// Iterates recipes in definition order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Recipe)> {
        self.recipes
            .iter()
            .map(|(name, recipe)| (name.as_str(), recipe))
    }

    /// Number of recipes.
    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    /// Returns `true` when no recipe is defined.
    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Returns `true` when some step bakes at a reading temperature.
    pub fn reads_input(&self) -> bool {
        self.iter().any(|(_, recipe)| {
            recipe.steps.iter().any(|step| {
                matches!(step.action, Action::Bake { temperature, .. } if temperature.reads_input())
            })
        })
    }
}
