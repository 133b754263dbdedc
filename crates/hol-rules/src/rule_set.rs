//! `JurisdictionRuleSet`, the validated and immutable rule description of
//! one jurisdiction, and its builder.
//!
//! All structural checks happen in [`RuleSetBuilder::build`]: a rule set that
//! exists is a rule set the resolver can evaluate without errors.

use std::collections::{BTreeSet, HashMap};

use hol_core::errors::Result;
use hol_core::{invalid_rule, CountryCode, Settings, SubdivisionCode};
use hol_time::ObservancePolicy;

use crate::rule::Rule;

/// What the resolver does when two rules land on the same date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CollisionPolicy {
    /// The later rule in declaration order replaces the earlier one.
    #[default]
    LastWriteWins,
    /// Collisions are reported: `resolve` logs a warning (still keeping the
    /// later rule) and `resolve_strict` returns an error.
    Strict,
}

/// The immutable, declarative description of all holidays of a jurisdiction
/// (or of one regional layer of it).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JurisdictionRuleSet {
    country_code: CountryCode,
    rules: Vec<Rule>,
    categories: BTreeSet<String>,
    subdivisions: BTreeSet<SubdivisionCode>,
    observance: ObservancePolicy,
    collision: CollisionPolicy,
    /// Rule indices with every `Composite` rule after its anchor.
    order: Vec<usize>,
    /// Rule id → index into `rules`.
    index: HashMap<String, usize>,
}

impl JurisdictionRuleSet {
    /// Begin building a rule set for `country_code`.
    pub fn builder(country_code: impl Into<CountryCode>) -> RuleSetBuilder {
        RuleSetBuilder::new(country_code)
    }

    /// Country code.
    pub fn country_code(&self) -> &str {
        &self.country_code
    }

    /// Rules in declaration order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the set holds no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Look a rule up by id.
    pub fn rule(&self, id: &str) -> Option<&Rule> {
        self.index.get(id).map(|&i| &self.rules[i])
    }

    /// Index of the rule with the given id.
    pub(crate) fn position(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Rule indices in dependency order.
    pub(crate) fn evaluation_order(&self) -> &[usize] {
        &self.order
    }

    /// Declared categories.
    pub fn categories(&self) -> &BTreeSet<String> {
        &self.categories
    }

    /// Declared subdivision codes.
    pub fn subdivisions(&self) -> &BTreeSet<SubdivisionCode> {
        &self.subdivisions
    }

    /// Jurisdiction-wide weekend-observance policy.
    pub fn observance(&self) -> ObservancePolicy {
        self.observance
    }

    /// Collision policy.
    pub fn collision_policy(&self) -> CollisionPolicy {
        self.collision
    }

    /// Whether `code` is a declared subdivision.
    pub fn is_subdivision_supported(&self, code: &str) -> bool {
        self.subdivisions.contains(code)
    }

    /// Whether `category` is a declared category.
    pub fn is_category_supported(&self, category: &str) -> bool {
        self.categories.contains(category)
    }
}

/// Builder for [`JurisdictionRuleSet`].
#[derive(Debug, Clone)]
pub struct RuleSetBuilder {
    country_code: CountryCode,
    rules: Vec<Rule>,
    categories: BTreeSet<String>,
    subdivisions: BTreeSet<SubdivisionCode>,
    observance: ObservancePolicy,
    collision: CollisionPolicy,
}

impl RuleSetBuilder {
    /// Begin building a rule set. The collision policy defaults to the
    /// process-wide [`Settings`].
    pub fn new(country_code: impl Into<CountryCode>) -> Self {
        let collision = if Settings::instance().strict_collisions() {
            CollisionPolicy::Strict
        } else {
            CollisionPolicy::LastWriteWins
        };
        Self {
            country_code: country_code.into(),
            rules: Vec::new(),
            categories: BTreeSet::new(),
            subdivisions: BTreeSet::new(),
            observance: ObservancePolicy::None,
            collision,
        }
    }

    /// Append a rule. Declaration order decides same-date collisions.
    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Append several rules.
    pub fn rules(mut self, rules: impl IntoIterator<Item = Rule>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Declare the category vocabulary. When none is declared it is
    /// inferred from the rules.
    pub fn categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories.extend(categories.into_iter().map(Into::into));
        self
    }

    /// Declare the subdivision codes. When none are declared they are
    /// inferred from the rules.
    pub fn subdivisions<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SubdivisionCode>,
    {
        self.subdivisions.extend(codes.into_iter().map(Into::into));
        self
    }

    /// Set the weekend-observance policy.
    pub fn observance(mut self, policy: ObservancePolicy) -> Self {
        self.observance = policy;
        self
    }

    /// Set the collision policy.
    pub fn collision_policy(mut self, policy: CollisionPolicy) -> Self {
        self.collision = policy;
        self
    }

    /// Validate the rules and freeze the rule set. The country code is
    /// stored trimmed and upper-cased.
    ///
    /// # Errors
    /// [`hol_core::Error::InvalidRule`] if any rule is structurally invalid,
    /// ids repeat, a category or subdivision is undeclared, or a `Composite`
    /// rule references an unknown rule or takes part in a cycle.
    pub fn build(self) -> Result<JurisdictionRuleSet> {
        let country = self.country_code.trim().to_ascii_uppercase();
        if country.is_empty() {
            invalid_rule!("rule set has an empty country code");
        }

        let mut index = HashMap::with_capacity(self.rules.len());
        for (i, rule) in self.rules.iter().enumerate() {
            rule.validate()?;
            if index.insert(rule.id().to_string(), i).is_some() {
                invalid_rule!("{country}: duplicate rule id {:?}", rule.id());
            }
        }

        let categories = if self.categories.is_empty() {
            self.rules.iter().map(|r| r.category().to_string()).collect()
        } else {
            self.categories
        };
        if let Some(rule) = self.rules.iter().find(|r| !categories.contains(r.category())) {
            invalid_rule!(
                "{country}: rule {:?} uses undeclared category {:?}",
                rule.id(),
                rule.category()
            );
        }

        let subdivisions = if self.subdivisions.is_empty() {
            self.rules
                .iter()
                .flat_map(|r| r.subdivisions().iter().cloned())
                .collect()
        } else {
            self.subdivisions
        };
        for rule in &self.rules {
            if let Some(code) = rule.subdivisions().difference(&subdivisions).next() {
                invalid_rule!(
                    "{country}: rule {:?} uses undeclared subdivision {code:?}",
                    rule.id()
                );
            }
        }

        let order = dependency_order(&country, &self.rules, &index)?;

        Ok(JurisdictionRuleSet {
            country_code: country,
            rules: self.rules,
            categories,
            subdivisions,
            observance: self.observance,
            collision: self.collision,
            order,
            index,
        })
    }
}

/// Topologically sort the rules so every `Composite` rule follows its anchor
/// (Kahn's algorithm). Ties resolve in declaration order.
fn dependency_order(
    country: &str,
    rules: &[Rule],
    index: &HashMap<String, usize>,
) -> Result<Vec<usize>> {
    let n = rules.len();
    let mut indegree = vec![0usize; n];
    let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); n];
    for (i, rule) in rules.iter().enumerate() {
        if let Some(anchor) = rule.dependency() {
            let Some(&j) = index.get(anchor) else {
                invalid_rule!("{country}: rule {:?} references unknown rule {anchor:?}", rule.id());
            };
            indegree[i] += 1;
            dependents[j].push(i);
        }
    }

    let mut ready: BTreeSet<usize> = (0..n).filter(|&i| indegree[i] == 0).collect();
    let mut order = Vec::with_capacity(n);
    while let Some(i) = ready.pop_first() {
        order.push(i);
        for &k in &dependents[i] {
            indegree[k] -= 1;
            if indegree[k] == 0 {
                ready.insert(k);
            }
        }
    }

    if order.len() < n {
        let cyclic: Vec<&str> = (0..n)
            .filter(|&i| indegree[i] > 0)
            .map(|i| rules[i].id())
            .collect();
        invalid_rule!("{country}: cyclic composite rules {cyclic:?}");
    }
    Ok(order)
}
