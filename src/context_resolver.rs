use crate::{
    ContextSet, ContextVerdict, CREDENTIALS_CONTEXT_V1_URL, ED25519_SIGNATURE_2018_CONTEXT_URL,
    ED25519_SIGNATURE_2020_CONTEXT_URL, SECURITY_CONTEXT_V2_URL,
};
use std::borrow::Cow;

/// A pair of contexts that must not be declared together, because the generic one already defines
/// the terms the specific one defines, differently.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CollisionRule {
    pub specific_context_url: Cow<'static, str>,
    pub generic_context_url: Cow<'static, str>,
}

impl CollisionRule {
    pub fn new(
        specific_context_url: impl Into<Cow<'static, str>>,
        generic_context_url: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            specific_context_url: specific_context_url.into(),
            generic_context_url: generic_context_url.into(),
        }
    }
    fn is_violated_by(&self, context_set: &ContextSet) -> bool {
        context_set.contains(&self.specific_context_url)
            && context_set.contains(&self.generic_context_url)
    }
}

/// Decides whether a document's declared contexts let a signature suite interpret its proof terms.
/// Collision rules are evaluated in order, before compatibility, and the first violated rule wins.
#[derive(Clone, Debug)]
pub struct ContextResolver {
    compatible_context_url_v: Vec<Cow<'static, str>>,
    collision_rule_v: Vec<CollisionRule>,
}

impl ContextResolver {
    pub fn new(
        compatible_context_url_v: Vec<Cow<'static, str>>,
        collision_rule_v: Vec<CollisionRule>,
    ) -> Self {
        Self {
            compatible_context_url_v,
            collision_rule_v,
        }
    }
    /// The rules for Ed25519Signature2018: any of the suite context, the newer-variant context, the
    /// credentials context, or the security context is compatible, but the suite context collides
    /// with both generic contexts.
    pub fn ed25519_signature_2018() -> Self {
        Self::new(
            vec![
                ED25519_SIGNATURE_2018_CONTEXT_URL.into(),
                ED25519_SIGNATURE_2020_CONTEXT_URL.into(),
                CREDENTIALS_CONTEXT_V1_URL.into(),
                SECURITY_CONTEXT_V2_URL.into(),
            ],
            vec![
                CollisionRule::new(ED25519_SIGNATURE_2018_CONTEXT_URL, CREDENTIALS_CONTEXT_V1_URL),
                CollisionRule::new(ED25519_SIGNATURE_2018_CONTEXT_URL, SECURITY_CONTEXT_V2_URL),
            ],
        )
    }
    /// Builder-style addition of a collision rule, evaluated after the existing ones.
    pub fn with_collision_rule(mut self, collision_rule: CollisionRule) -> Self {
        self.collision_rule_v.push(collision_rule);
        self
    }
    pub fn compatible_context_urls(&self) -> impl Iterator<Item = &str> {
        self.compatible_context_url_v.iter().map(|url| url.as_ref())
    }
    pub fn resolve(&self, context_set: &ContextSet) -> ContextVerdict {
        if let Some(collision_rule) = self
            .collision_rule_v
            .iter()
            .find(|collision_rule| collision_rule.is_violated_by(context_set))
        {
            tracing::warn!(
                "Warning: The {:?} and {:?} contexts are incompatible. For documents using the {:?} context, the {:?} context is not necessary.",
                collision_rule.specific_context_url,
                collision_rule.generic_context_url,
                collision_rule.generic_context_url,
                collision_rule.specific_context_url,
            );
            return ContextVerdict::Incompatible {
                specific_context_url: collision_rule.specific_context_url.to_string(),
                generic_context_url: collision_rule.generic_context_url.to_string(),
            };
        }
        if self
            .compatible_context_url_v
            .iter()
            .any(|url| context_set.contains(url))
        {
            ContextVerdict::Compatible
        } else {
            ContextVerdict::Absent
        }
    }
    /// Convenience for resolving the context set of a document.
    pub fn resolve_document(&self, document: &serde_json::Value) -> ContextVerdict {
        self.resolve(&ContextSet::of_document(document))
    }
}

impl Default for ContextResolver {
    fn default() -> Self {
        Self::ed25519_signature_2018()
    }
}
