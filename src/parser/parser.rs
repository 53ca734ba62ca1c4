//! Recursive-descent parser for recipe programs.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::error::{CompileError, CompileResult};
use crate::lexer::{Location, MEASURES, Token, TokenKind};
use crate::parser::ast::{
    Action, BowlKind, BowlRef, Ingredient, MixOp, MoldKind, MoldRef, Predicate, Program, Recipe,
    Step, Temperature,
};
use crate::parser::token_stream::TokenStream;

/// Name of the recipe the program starts from.
pub const ENTRY_RECIPE: &str = "Muffin";

/// Single-pass parser that also runs the whole-program checks.
pub struct Parser<'a> {
    token_stream: TokenStream<'a>,
    ingredients: HashMap<String, Ingredient>,
    served: Vec<(String, Location)>,
}

impl<'a> Parser<'a> {
    /// Creates a parser over a token stream.
    pub fn new(token_stream: TokenStream<'a>) -> Self {
        Self {
            token_stream,
            ingredients: HashMap::new(),
            served: Vec::new(),
        }
    }

    /// Parses a whole program and validates cross-recipe references.
    pub fn parse_program(&mut self) -> CompileResult<Program> {
        let program = self.parse_program_nonterminal()?;
        self.check_program(&program)?;
        debug!(recipes = program.len(), "parsed program");
        Ok(program)
    }

    fn parse_program_nonterminal(&mut self) -> CompileResult<Program> {
        let mut program = Program::new();

        loop {
            let head = self
                .token_stream
                .expect(&[TokenKind::EndOfInput, TokenKind::Identifier])?;
            if head.kind == TokenKind::EndOfInput {
                break;
            }

            let name = phrase_text(&head);
            let recipe = self.parse_recipe_nonterminal()?;
            trace!(recipe = %name, steps = recipe.steps.len(), "parsed recipe");
            if !program.insert(name.as_str(), recipe) {
                return Err(CompileError::semantic(
                    format!("recipe \"{name}\" already exists"),
                    Some(head.location),
                ));
            }
        }

        Ok(program)
    }

    fn parse_recipe_nonterminal(&mut self) -> CompileResult<Recipe> {
        self.token_stream.expect_key_phrase(&["recipe"])?;
        self.token_stream.expect(&[TokenKind::Newline])?;
        self.token_stream.expect_key_phrase(&["ingredients"])?;
        self.token_stream.expect(&[TokenKind::Newline])?;
        self.parse_ingredients_nonterminal()?;
        self.token_stream.expect(&[TokenKind::Newline])?;
        let recipe = self.parse_method_nonterminal();
        self.ingredients.clear();
        recipe
    }

    /// Reads ingredient bindings up to and including the `method` phrase.
    fn parse_ingredients_nonterminal(&mut self) -> CompileResult<()> {
        loop {
            let value = self.token_stream.expect(&[
                TokenKind::KeyPhrase,
                TokenKind::String,
                TokenKind::Number,
            ])?;

            let name = match value.kind {
                TokenKind::KeyPhrase if value.is_key_phrase("method") => return Ok(()),
                TokenKind::KeyPhrase => {
                    return Err(CompileError::syntax(
                        format!("key phrase \"{}\" can't be used here", phrase_text(&value)),
                        Some(value.location),
                    ));
                }
                TokenKind::String => {
                    self.token_stream.expect_key_phrase(&["brand"])?;
                    self.token_stream.expect(&[TokenKind::Identifier])?
                }
                _ => {
                    let next = self
                        .token_stream
                        .expect(&[TokenKind::KeyPhrase, TokenKind::Identifier])?;
                    if next.kind == TokenKind::KeyPhrase {
                        let measure = phrase_text(&next);
                        if !MEASURES.contains(&measure.as_str()) {
                            return Err(CompileError::syntax(
                                format!("key phrase \"{measure}\" is not a measure"),
                                Some(next.location),
                            ));
                        }
                        self.token_stream.expect(&[TokenKind::Identifier])?
                    } else {
                        next
                    }
                }
            };
            self.token_stream.expect(&[TokenKind::Newline])?;

            let ingredient = match value.integer() {
                Some(number) => Ingredient::Number(number),
                None => Ingredient::Text(phrase_text(&value)),
            };
            let ingredient_name = phrase_text(&name);
            if self.ingredients.contains_key(&ingredient_name) {
                return Err(CompileError::semantic(
                    format!("ingredient \"{ingredient_name}\" used twice"),
                    Some(name.location),
                ));
            }
            self.ingredients.insert(ingredient_name, ingredient);
        }
    }

    /// Reads numbered steps until the next recipe name or the end of input.
    fn parse_method_nonterminal(&mut self) -> CompileResult<Recipe> {
        let mut steps = Vec::new();
        let mut jumps = Vec::new();

        loop {
            let kind = self.token_stream.peek()?.kind;
            if matches!(kind, TokenKind::EndOfInput | TokenKind::Identifier) {
                break;
            }

            let label = self.token_stream.expect(&[
                TokenKind::EndOfInput,
                TokenKind::Identifier,
                TokenKind::StepLabel,
            ])?;
            let number = steps.len() + 1;
            if label.integer() != i64::try_from(number).ok() {
                return Err(CompileError::syntax(
                    format!("wrong label; should be \"{number}.\""),
                    Some(label.location),
                ));
            }

            let step = self.parse_step_nonterminal(number, &mut jumps)?;
            steps.push(step);
        }

        for (target, location) in jumps {
            if usize::try_from(target).map_or(true, |target| target > steps.len()) {
                return Err(CompileError::semantic(
                    format!("step {target} does not exist"),
                    Some(location),
                ));
            }
        }

        Ok(Recipe { steps })
    }

    fn parse_step_nonterminal(
        &mut self,
        number: usize,
        jumps: &mut Vec<(i64, Location)>,
    ) -> CompileResult<Step> {
        let mut head = self.token_stream.expect(&[TokenKind::KeyPhrase])?;
        let mut predicate = None;
        if head.is_key_phrase("if") {
            predicate = Some(self.parse_predicate_nonterminal()?);
            head = self.token_stream.expect(&[TokenKind::KeyPhrase])?;
        }

        let action = self.parse_action_nonterminal(&head, number, jumps)?;
        self.token_stream.expect(&[TokenKind::Newline])?;
        Ok(Step::new(action, predicate))
    }

    fn parse_predicate_nonterminal(&mut self) -> CompileResult<Predicate> {
        let subject = self.parse_container()?;
        let test = self
            .token_stream
            .expect_key_phrase(&["is empty", "is not empty"])?;
        self.token_stream.expect(&[TokenKind::Comma])?;

        let empty = test.is_key_phrase("is empty");
        Ok(match (subject, empty) {
            (Container::Bowl(bowl), true) => Predicate::BowlIsEmpty(bowl),
            (Container::Bowl(bowl), false) => Predicate::BowlNotEmpty(bowl),
            (Container::Mold(mold), true) => Predicate::MoldIsEmpty(mold),
            (Container::Mold(mold), false) => Predicate::MoldNotEmpty(mold),
        })
    }

    fn parse_action_nonterminal(
        &mut self,
        head: &Token,
        number: usize,
        jumps: &mut Vec<(i64, Location)>,
    ) -> CompileResult<Action> {
        let phrase = phrase_text(head);
        let action = match phrase.as_str() {
            "set up a" => {
                let name = self.token_stream.expect(&[TokenKind::Identifier])?;
                let text = phrase_text(&name);
                if let Some(kind) = BowlKind::from_name(&text) {
                    Action::SetUpBowl { kind, count: 1 }
                } else if let Some(kind) = MoldKind::from_name(&text) {
                    Action::SetUpMold { kind, count: 1 }
                } else {
                    return Err(invalid_name(&name, "bowl/mold"));
                }
            }
            "set up" => {
                let count_token = self.token_stream.peek()?.clone();
                let count = self.parse_positive_integer()?;
                let count = u32::try_from(count).map_err(|_| {
                    CompileError::semantic(
                        format!("should be at most {}, not {count}", u32::MAX),
                        Some(count_token.location),
                    )
                })?;
                let name = self.token_stream.expect(&[TokenKind::Identifier])?;
                let text = phrase_text(&name);
                let lookup_bowl = if count > 1 { BowlKind::from_plural } else { BowlKind::from_name };
                let lookup_mold = if count > 1 { MoldKind::from_plural } else { MoldKind::from_name };
                if let Some(kind) = lookup_bowl(&text) {
                    Action::SetUpBowl { kind, count }
                } else if let Some(kind) = lookup_mold(&text) {
                    Action::SetUpMold { kind, count }
                } else {
                    return Err(invalid_name(&name, "bowl/mold"));
                }
            }
            "add" => {
                let (token, value) = self.parse_ingredient()?;
                self.token_stream.expect_key_phrase(&["into"])?;
                match (self.parse_container()?, value) {
                    (Container::Bowl(bowl), Ingredient::Number(amount)) => {
                        Action::AddToBowl { amount, bowl }
                    }
                    (Container::Bowl(_), Ingredient::Text(_)) => {
                        return Err(CompileError::semantic(
                            "can only add string ingredient to molds",
                            Some(token.location),
                        ));
                    }
                    (Container::Mold(mold), value) => Action::PushIngredient { mold, value },
                }
            }
            "remove" => {
                let amount = self.parse_number_ingredient()?;
                self.token_stream.expect_key_phrase(&["from"])?;
                let bowl = self.parse_bowl()?;
                Action::RemoveFromBowl { amount, bowl }
            }
            "clean" => Action::CleanBowl {
                bowl: self.parse_bowl()?,
            },
            "add water to" => {
                let bowl = self.parse_bowl()?;
                self.token_stream.expect_key_phrase(&["at a"])?;
                let one = self.token_stream.expect(&[TokenKind::Number])?;
                let left = one.integer().unwrap_or_default();
                if left != 1 {
                    return Err(CompileError::semantic(
                        format!("left hand side of ratio must be 1, not {left}"),
                        Some(one.location),
                    ));
                }
                self.token_stream.expect(&[TokenKind::Colon])?;
                let ratio = self.parse_positive_integer()?;
                self.token_stream.expect_key_phrase(&["ratio"])?;
                Action::AddWater { bowl, ratio }
            }
            "pour half of contents of" => {
                let from = self.parse_bowl()?;
                self.token_stream.expect_key_phrase(&["into"])?;
                match self.parse_container()? {
                    Container::Bowl(into) => Action::PourHalf { from, into },
                    Container::Mold(mold) => Action::PushHalfBowl { mold, bowl: from },
                }
            }
            "pour contents of" => {
                let from = self.parse_bowl()?;
                self.token_stream.expect_key_phrase(&["into"])?;
                match self.parse_container()? {
                    Container::Bowl(into) => Action::PourAll { from, into },
                    Container::Mold(mold) => Action::PushBowl { mold, bowl: from },
                }
            }
            "proceed to step" | "go back to step" => {
                let token = self.token_stream.expect(&[TokenKind::Number])?;
                let target = token.integer().unwrap_or_default();
                let current = i64::try_from(number).unwrap_or(i64::MAX);
                if phrase == "proceed to step" && target <= current {
                    return Err(CompileError::semantic(
                        "must be a future step number",
                        Some(token.location),
                    ));
                }
                if phrase == "go back to step" && (target >= current || target <= 0) {
                    return Err(CompileError::semantic(
                        "must be a previous step number",
                        Some(token.location),
                    ));
                }
                jumps.push((target, token.location));
                Action::Jump {
                    target: usize::try_from(target).unwrap_or(usize::MAX),
                }
            }
            "place" => {
                let bowl = self.parse_bowl()?;
                self.token_stream
                    .expect_key_phrase(&["in the oven and bake at"])?;
                let token = self.token_stream.expect(&[TokenKind::Temperature])?;
                let code = phrase_text(&token);
                let temperature = Temperature::from_code(&code).ok_or_else(|| {
                    CompileError::semantic(
                        format!("our oven can't be set to {code}!"),
                        Some(token.location),
                    )
                })?;
                Action::Bake { bowl, temperature }
            }
            "serves" => Action::Serves {
                count: self.parse_positive_integer()?,
            },
            "remove a layer from" => {
                let mold = self.parse_mold()?;
                if self.parse_trailer("and dump into")? {
                    Action::PopInto {
                        mold,
                        bowl: self.parse_bowl()?,
                    }
                } else {
                    Action::Pop { mold }
                }
            }
            "microwave" => {
                let mold = self.parse_mold()?;
                if self.parse_trailer("in grill mode")? {
                    Action::MicrowaveGrill { mold }
                } else {
                    Action::Microwave { mold }
                }
            }
            "stir the mixture in" => {
                let mold = self.parse_mold()?;
                self.token_stream.expect_key_phrase(&["until smooth"])?;
                Action::Mix {
                    mold,
                    op: MixOp::Stir,
                }
            }
            "sift the mixture in" => Action::Mix {
                mold: self.parse_mold()?,
                op: MixOp::Sift,
            },
            "whip the mixture in" => Action::Mix {
                mold: self.parse_mold()?,
                op: MixOp::Whip,
            },
            "bring the mixture in" => {
                let mold = self.parse_mold()?;
                self.token_stream.expect_key_phrase(&["to a boil"])?;
                Action::Mix {
                    mold,
                    op: MixOp::Boil,
                }
            }
            "serve with" => {
                let name = self.token_stream.expect(&[TokenKind::Identifier])?;
                let recipe = phrase_text(&name);
                self.served.push((recipe.clone(), name.location));
                Action::ServeWith { recipe }
            }
            _ => {
                return Err(CompileError::syntax(
                    format!("unknown step \"{phrase}\""),
                    Some(head.location),
                ));
            }
        };

        Ok(action)
    }

    /// Consumes an optional trailing key phrase; only `expected` may follow.
    fn parse_trailer(&mut self, expected: &str) -> CompileResult<bool> {
        let Some(token) = self
            .token_stream
            .consume_if(|token| token.kind == TokenKind::KeyPhrase)?
        else {
            return Ok(false);
        };
        if token.is_key_phrase(expected) {
            return Ok(true);
        }
        Err(CompileError::syntax(
            format!("key phrase \"{}\" can't be used here", phrase_text(&token)),
            Some(token.location),
        ))
    }

    fn parse_positive_integer(&mut self) -> CompileResult<i64> {
        let token = self.token_stream.expect(&[TokenKind::Number])?;
        let value = token.integer().unwrap_or_default();
        if value <= 0 {
            return Err(CompileError::semantic(
                format!("should be positive, not {value}"),
                Some(token.location),
            ));
        }
        Ok(value)
    }

    fn parse_ingredient(&mut self) -> CompileResult<(Token, Ingredient)> {
        let token = self.token_stream.expect(&[TokenKind::Identifier])?;
        let name = phrase_text(&token);
        match self.ingredients.get(&name) {
            Some(value) => Ok((token, value.clone())),
            None => Err(CompileError::semantic(
                format!("undefined ingredient \"{name}\""),
                Some(token.location),
            )),
        }
    }

    fn parse_number_ingredient(&mut self) -> CompileResult<i64> {
        match self.parse_ingredient()? {
            (_, Ingredient::Number(value)) => Ok(value),
            (token, Ingredient::Text(_)) => Err(CompileError::semantic(
                format!(
                    "cannot use string type ingredient \"{}\" here",
                    phrase_text(&token)
                ),
                Some(token.location),
            )),
        }
    }

    /// Reads an optional ordinal (default 1) followed by a kind name.
    fn parse_ordinal_and_name(&mut self) -> CompileResult<(u32, Token)> {
        let head = self
            .token_stream
            .expect(&[TokenKind::Ordinal, TokenKind::Identifier])?;
        if head.kind == TokenKind::Identifier {
            return Ok((1, head));
        }

        let value = head.integer().unwrap_or_default();
        let ordinal = u32::try_from(value)
            .ok()
            .filter(|ordinal| *ordinal > 0)
            .ok_or_else(|| {
                CompileError::semantic(format!("invalid ordinal {value}"), Some(head.location))
            })?;
        let name = self.token_stream.expect(&[TokenKind::Identifier])?;
        Ok((ordinal, name))
    }

    fn parse_container(&mut self) -> CompileResult<Container> {
        let (ordinal, name) = self.parse_ordinal_and_name()?;
        let text = phrase_text(&name);
        if let Some(kind) = BowlKind::from_name(&text) {
            Ok(Container::Bowl(BowlRef::new(kind, ordinal)))
        } else if let Some(kind) = MoldKind::from_name(&text) {
            Ok(Container::Mold(MoldRef::new(kind, ordinal)))
        } else {
            Err(invalid_name(&name, "bowl/mold"))
        }
    }

    fn parse_bowl(&mut self) -> CompileResult<BowlRef> {
        let (ordinal, name) = self.parse_ordinal_and_name()?;
        BowlKind::from_name(&phrase_text(&name))
            .map(|kind| BowlRef::new(kind, ordinal))
            .ok_or_else(|| invalid_name(&name, "bowl"))
    }

    fn parse_mold(&mut self) -> CompileResult<MoldRef> {
        let (ordinal, name) = self.parse_ordinal_and_name()?;
        MoldKind::from_name(&phrase_text(&name))
            .map(|kind| MoldRef::new(kind, ordinal))
            .ok_or_else(|| invalid_name(&name, "mold"))
    }

    /// Checks that need the whole program: the entry recipe and every
    /// `serve with` target must exist.
    fn check_program(&self, program: &Program) -> CompileResult<()> {
        if let Some((recipe, location)) = self
            .served
            .iter()
            .find(|(recipe, _)| !program.contains(recipe))
        {
            return Err(CompileError::semantic(
                format!("undefined recipe \"{recipe}\""),
                Some(*location),
            ));
        }

        if !program.contains(ENTRY_RECIPE) {
            return Err(CompileError::semantic(
                format!("no \"{ENTRY_RECIPE}\" recipe found"),
                None,
            ));
        }

        Ok(())
    }
}

/// Bowl or mold operand, for grammar slots that accept either.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Container {
    Bowl(BowlRef),
    Mold(MoldRef),
}

fn phrase_text(token: &Token) -> String {
    token.text().unwrap_or_default().to_string()
}

fn invalid_name(token: &Token, class: &str) -> CompileError {
    CompileError::syntax(
        format!("\"{}\" is not a valid {class} name", phrase_text(token)),
        Some(token.location),
    )
}
