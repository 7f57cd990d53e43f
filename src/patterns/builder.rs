//! Builder pattern: assembling a hamburger one topping at a time.
//!
//! [`BurgerBuilder`] is a mutable builder with an explicit two-state
//! lifecycle. Setters only work while it is `Configuring`; the first
//! [`BurgerBuilder::build`] moves it to `Built`, after which the builder
//! hands out copies of the same [`Burger`] and rejects further changes.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::catalog::{Category, ExampleDescriptor};
use crate::error::{CatalogError, ExampleFailure, Result};
use crate::runner::{Output, Transcript};

pub const NAME: &str = "Builder";

/// Immutable product of a finished builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Burger {
    pub name: String,
    pub patties: u32,
    pub bacon: bool,
    pub cheese: bool,
    pub pickles: bool,
    pub mustard: bool,
    pub tomato: bool,
}

impl Default for Burger {
    fn default() -> Self {
        Burger {
            name: "Hamburger".to_string(),
            patties: 1,
            bacon: false,
            cheese: false,
            pickles: true,
            mustard: true,
            tomato: false,
        }
    }
}

impl fmt::Display for Burger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let noun = if self.patties == 1 { "patty" } else { "patties" };
        write!(f, "{}: {} {}", self.name, self.patties, noun)?;

        let toppings = [
            ("bacon", self.bacon),
            ("cheese", self.cheese),
            ("pickles", self.pickles),
            ("mustard", self.mustard),
            ("tomato", self.tomato),
        ];
        for (topping, _) in toppings.iter().filter(|(_, on)| *on) {
            write!(f, ", {topping}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuilderState {
    Configuring,
    Built,
}

impl BuilderState {
    fn as_str(&self) -> &'static str {
        match self {
            BuilderState::Configuring => "configuring",
            BuilderState::Built => "built",
        }
    }
}

/// Owned by a single caller; not meant to be shared while configuring.
#[derive(Debug)]
pub struct BurgerBuilder {
    config: Burger,
    state: BuilderState,
}

impl Default for BurgerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BurgerBuilder {
    pub fn new() -> Self {
        BurgerBuilder {
            config: Burger::default(),
            state: BuilderState::Configuring,
        }
    }

    pub fn state(&self) -> BuilderState {
        self.state
    }

    fn configure(&mut self, operation: &'static str) -> Result<&mut Burger> {
        match self.state {
            BuilderState::Configuring => Ok(&mut self.config),
            BuilderState::Built => Err(CatalogError::InvalidState {
                operation,
                state: self.state.as_str(),
            }),
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<&mut Self> {
        self.configure("set name")?.name = name.into();
        Ok(self)
    }

    pub fn set_patties(&mut self, patties: u32) -> Result<&mut Self> {
        self.configure("set patties")?.patties = patties;
        Ok(self)
    }

    pub fn set_bacon(&mut self, bacon: bool) -> Result<&mut Self> {
        self.configure("set bacon")?.bacon = bacon;
        Ok(self)
    }

    pub fn set_cheese(&mut self, cheese: bool) -> Result<&mut Self> {
        self.configure("set cheese")?.cheese = cheese;
        Ok(self)
    }

    pub fn set_pickles(&mut self, pickles: bool) -> Result<&mut Self> {
        self.configure("set pickles")?.pickles = pickles;
        Ok(self)
    }

    pub fn set_mustard(&mut self, mustard: bool) -> Result<&mut Self> {
        self.configure("set mustard")?.mustard = mustard;
        Ok(self)
    }

    pub fn set_tomato(&mut self, tomato: bool) -> Result<&mut Self> {
        self.configure("set tomato")?.tomato = tomato;
        Ok(self)
    }

    /// Freezes the configuration. Calling it again returns an equal burger.
    pub fn build(&mut self) -> Burger {
        self.state = BuilderState::Built;
        self.config.clone()
    }
}

/// Order accepted as runner input. Missing fields keep the builder defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BurgerOrder {
    pub name: Option<String>,
    pub patties: Option<u32>,
    pub bacon: Option<bool>,
    pub cheese: Option<bool>,
    pub pickles: Option<bool>,
    pub mustard: Option<bool>,
    pub tomato: Option<bool>,
}

impl BurgerOrder {
    pub fn from_input(input: Option<&Value>) -> Result<Self> {
        match input {
            None | Some(Value::Null) => Ok(BurgerOrder::default()),
            Some(value) if !value.is_object() => Err(CatalogError::invalid_input(
                NAME,
                format!("expected a JSON object, got {value}"),
            )),
            Some(value) => serde_json::from_value(value.clone())
                .map_err(|err| CatalogError::invalid_input(NAME, err.to_string())),
        }
    }

    pub fn apply(&self, builder: &mut BurgerBuilder) -> Result<()> {
        if let Some(name) = &self.name {
            builder.set_name(name.clone())?;
        }
        if let Some(patties) = self.patties {
            builder.set_patties(patties)?;
        }
        if let Some(bacon) = self.bacon {
            builder.set_bacon(bacon)?;
        }
        if let Some(cheese) = self.cheese {
            builder.set_cheese(cheese)?;
        }
        if let Some(pickles) = self.pickles {
            builder.set_pickles(pickles)?;
        }
        if let Some(mustard) = self.mustard {
            builder.set_mustard(mustard)?;
        }
        if let Some(tomato) = self.tomato {
            builder.set_tomato(tomato)?;
        }
        Ok(())
    }
}

fn run(input: Option<&Value>) -> std::result::Result<Output, ExampleFailure> {
    let order = BurgerOrder::from_input(input)?;
    let mut builder = BurgerBuilder::new();
    order.apply(&mut builder)?;

    let burger = builder.build();
    let mut out = Transcript::new();
    out.line(format!("Built {burger}"));

    if let Err(rejected) = builder.set_patties(burger.patties.saturating_add(1)) {
        out.line(format!("Changing it afterwards is refused: {rejected}"));
    }

    Ok(out.into_output(Some(serde_json::to_value(&burger)?)))
}

pub fn descriptor() -> ExampleDescriptor {
    ExampleDescriptor::new(
        NAME,
        Category::Creational,
        "Assembles a hamburger step by step, then freezes it into an immutable product",
        run,
    )
    .with_sample_input(serde_json::json!({ "patties": 2, "cheese": true }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let burger = BurgerBuilder::new().build();
        assert_eq!(
            burger,
            Burger {
                name: "Hamburger".into(),
                patties: 1,
                bacon: false,
                cheese: false,
                pickles: true,
                mustard: true,
                tomato: false,
            }
        );
    }

    #[test]
    fn test_setters_chain() {
        let mut builder = BurgerBuilder::new();
        builder
            .set_patties(3)
            .and_then(|b| b.set_bacon(true))
            .and_then(|b| b.set_pickles(false))
            .unwrap();

        let burger = builder.build();
        assert_eq!(burger.patties, 3);
        assert!(burger.bacon);
        assert!(!burger.pickles);
        assert!(burger.mustard);
    }

    #[test]
    fn test_zero_patties_is_allowed() {
        let mut builder = BurgerBuilder::new();
        builder.set_patties(0).unwrap();
        assert_eq!(builder.build().patties, 0);
    }

    #[test]
    fn test_build_is_idempotent() {
        let mut builder = BurgerBuilder::new();
        builder.set_cheese(true).unwrap();

        let first = builder.build();
        let second = builder.build();
        assert_eq!(first, second);
        assert_eq!(builder.state(), BuilderState::Built);
    }

    #[test]
    fn test_setter_after_build_is_invalid_state() {
        let mut builder = BurgerBuilder::new();
        let built = builder.build();

        let err = builder.set_tomato(true).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::InvalidState { operation: "set tomato", state: "built" }
        ));
        assert_eq!(builder.build(), built);
    }

    #[test]
    fn test_every_setter_is_refused_after_build() {
        let mut builder = BurgerBuilder::new();
        let built = builder.build();

        let attempts = [
            ("set name", builder.set_name("Veggie").map(|_| ())),
            ("set patties", builder.set_patties(4).map(|_| ())),
            ("set bacon", builder.set_bacon(true).map(|_| ())),
            ("set cheese", builder.set_cheese(true).map(|_| ())),
            ("set pickles", builder.set_pickles(false).map(|_| ())),
            ("set mustard", builder.set_mustard(false).map(|_| ())),
            ("set tomato", builder.set_tomato(true).map(|_| ())),
        ];
        for (expected, attempt) in attempts {
            match attempt {
                Err(CatalogError::InvalidState { operation, state }) => {
                    assert_eq!(operation, expected);
                    assert_eq!(state, "built");
                }
                other => panic!("{expected} after build gave {other:?}"),
            }
        }
        assert_eq!(builder.build(), built);
    }

    #[test]
    fn test_display_lists_toppings() {
        let mut builder = BurgerBuilder::new();
        builder.set_patties(2).unwrap().set_cheese(true).unwrap();
        assert_eq!(
            builder.build().to_string(),
            "Hamburger: 2 patties, cheese, pickles, mustard"
        );
        assert_eq!(Burger::default().to_string(), "Hamburger: 1 patty, pickles, mustard");
    }

    #[test]
    fn test_order_rejects_bad_input() {
        let err = BurgerOrder::from_input(Some(&json!({ "patties": -1 }))).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidInput { .. }));

        let err = BurgerOrder::from_input(Some(&json!({ "onions": true }))).unwrap_err();
        assert!(err.to_string().contains("onions"));
    }

    #[test]
    fn test_order_must_be_an_object() {
        for input in [json!(["X", 2]), json!([1]), json!("cheese"), json!(2)] {
            let err = BurgerOrder::from_input(Some(&input)).unwrap_err();
            assert!(
                err.to_string().contains("expected a JSON object"),
                "{input} gave {err}"
            );
        }
        assert_eq!(
            BurgerOrder::from_input(Some(&Value::Null)).unwrap(),
            BurgerOrder::default()
        );
    }

    #[test]
    fn test_run_reports_burger() {
        let output = run(Some(&json!({ "patties": 2, "cheese": true }))).unwrap();
        let burger: Burger = serde_json::from_value(output.value.unwrap()).unwrap();
        assert_eq!(burger.patties, 2);
        assert!(burger.cheese);
        assert!(output.text.contains("refused"));
    }

    fn order_strategy() -> impl Strategy<Value = BurgerOrder> {
        (
            proptest::option::of("[A-Za-z ]{1,12}"),
            proptest::option::of(0u32..10),
            proptest::option::of(any::<bool>()),
            proptest::option::of(any::<bool>()),
            proptest::option::of(any::<bool>()),
            proptest::option::of(any::<bool>()),
            proptest::option::of(any::<bool>()),
        )
            .prop_map(|(name, patties, bacon, cheese, pickles, mustard, tomato)| BurgerOrder {
                name,
                patties,
                bacon,
                cheese,
                pickles,
                mustard,
                tomato,
            })
    }

    proptest! {
        #[test]
        fn prop_assigned_fields_win_and_rest_default(order in order_strategy()) {
            let mut builder = BurgerBuilder::new();
            order.apply(&mut builder).unwrap();
            let burger = builder.build();
            let defaults = Burger::default();

            prop_assert_eq!(&burger.name, order.name.as_ref().unwrap_or(&defaults.name));
            prop_assert_eq!(burger.patties, order.patties.unwrap_or(defaults.patties));
            prop_assert_eq!(burger.bacon, order.bacon.unwrap_or(defaults.bacon));
            prop_assert_eq!(burger.cheese, order.cheese.unwrap_or(defaults.cheese));
            prop_assert_eq!(burger.pickles, order.pickles.unwrap_or(defaults.pickles));
            prop_assert_eq!(burger.mustard, order.mustard.unwrap_or(defaults.mustard));
            prop_assert_eq!(burger.tomato, order.tomato.unwrap_or(defaults.tomato));

            prop_assert_eq!(builder.build(), burger);
        }
    }
}
