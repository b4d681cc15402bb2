// src/schema/model.rs
//
// Model classes and templates. A ModelClass is immutable once built; the
// specialization engine derives new classes from templates through the
// `ModelClass::create` construction service.

use std::sync::{Arc, OnceLock};

use crate::schema::{FieldDecl, FieldInfo, ModelConfig, Validator};
use crate::types::{Placeholder, TypeExpr};

/// Hook producing the display name for a specialized class.
///
/// Pure function of the template and the supplied arguments; templates may
/// override it, and classes specialized from a template inherit its hook.
pub type NamingHook = fn(&ModelClass, &[TypeExpr]) -> String;

static ROOT_MODEL: OnceLock<Arc<ModelClass>> = OnceLock::new();

/// A model class: a plain model, a template with declared type parameters,
/// or a class produced by specializing a template.
#[derive(Debug)]
pub struct ModelClass {
    name: String,
    base: Option<Arc<ModelClass>>,
    root: bool,
    /// `None` means the class was never marked generic (no parameter list
    /// declared at all).
    parameters: Option<Vec<Placeholder>>,
    /// Set only by specialization, once no unbound placeholder remains in
    /// any field type.
    concrete: bool,
    fields: Vec<FieldDecl>,
    validators: Vec<Validator>,
    config: Arc<ModelConfig>,
    naming: Option<NamingHook>,
}

impl ModelClass {
    /// The abstract root every model ultimately derives from. Not generic
    /// and not concrete; parameterizing it directly is a caller error.
    pub fn root() -> &'static Arc<ModelClass> {
        ROOT_MODEL.get_or_init(|| {
            Arc::new(ModelClass {
                name: "Model".to_string(),
                base: None,
                root: true,
                parameters: None,
                concrete: false,
                fields: Vec::new(),
                validators: Vec::new(),
                config: Arc::new(ModelConfig::default()),
                naming: None,
            })
        })
    }

    /// Start declaring a model or template.
    pub fn builder(name: impl Into<String>) -> ModelBuilder {
        ModelBuilder {
            name: name.into(),
            base: None,
            parameters: None,
            fields: Vec::new(),
            validators: Vec::new(),
            config: None,
            naming: None,
        }
    }

    /// Class-construction service: build a class derived from a template
    /// with already-resolved field types. Used by the specialization engine.
    pub fn create(spec: ClassSpec) -> Arc<ModelClass> {
        Arc::new(ModelClass {
            name: spec.name,
            base: Some(spec.base),
            root: false,
            parameters: spec.parameters,
            concrete: spec.concrete,
            fields: spec.fields,
            validators: spec.validators,
            config: spec.config,
            naming: spec.naming,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn base(&self) -> Option<&Arc<ModelClass>> {
        self.base.as_ref()
    }

    pub fn is_root(&self) -> bool {
        self.root
    }

    /// The declared (or computed-remaining) parameter list, or `None` if
    /// this class was never marked generic.
    pub fn parameters(&self) -> Option<&[Placeholder]> {
        self.parameters.as_deref()
    }

    pub fn is_concrete(&self) -> bool {
        self.concrete
    }

    /// True for a class that can still be parameterized: it declares (or
    /// retains) a parameter list and is not a concrete instantiation.
    /// Plain models are neither concrete nor templates.
    pub fn is_template(&self) -> bool {
        self.parameters.is_some() && !self.concrete
    }

    pub fn fields(&self) -> &[FieldDecl] {
        &self.fields
    }

    /// Validators declared directly on this class, excluding ancestors.
    pub fn own_validators(&self) -> &[Validator] {
        &self.validators
    }

    pub fn config(&self) -> &Arc<ModelConfig> {
        &self.config
    }

    pub fn naming(&self) -> Option<NamingHook> {
        self.naming
    }
}

/// Inputs to the class-construction service.
pub struct ClassSpec {
    pub name: String,
    pub base: Arc<ModelClass>,
    pub fields: Vec<FieldDecl>,
    pub validators: Vec<Validator>,
    pub config: Arc<ModelConfig>,
    pub naming: Option<NamingHook>,
    pub concrete: bool,
    pub parameters: Option<Vec<Placeholder>>,
}

/// Builder for declaring models and templates.
pub struct ModelBuilder {
    name: String,
    base: Option<Arc<ModelClass>>,
    parameters: Option<Vec<Placeholder>>,
    fields: Vec<FieldDecl>,
    validators: Vec<Validator>,
    config: Option<Arc<ModelConfig>>,
    naming: Option<NamingHook>,
}

impl ModelBuilder {
    /// Declare the ordered type-parameter list, marking the class generic.
    /// Parameters must be distinct.
    pub fn parameters<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let params: Vec<Placeholder> = names
            .into_iter()
            .map(|n| Placeholder::new(n.as_ref()))
            .collect();
        debug_assert!(
            params
                .iter()
                .enumerate()
                .all(|(i, p)| !params[..i].contains(p)),
            "template parameters must be distinct"
        );
        self.parameters = Some(params);
        self
    }

    /// Derive from an explicit base instead of the abstract root.
    pub fn base(mut self, base: Arc<ModelClass>) -> Self {
        self.base = Some(base);
        self
    }

    pub fn field(mut self, name: &str, ty: TypeExpr) -> Self {
        self.fields.push(FieldDecl::new(name, ty));
        self
    }

    pub fn field_with(mut self, name: &str, ty: TypeExpr, info: FieldInfo) -> Self {
        self.fields.push(FieldDecl::with_info(name, ty, info));
        self
    }

    pub fn validator(mut self, name: &str) -> Self {
        self.validators.push(Validator::new(name));
        self
    }

    pub fn config(mut self, config: Arc<ModelConfig>) -> Self {
        self.config = Some(config);
        self
    }

    /// Override the display-naming hook for classes specialized from this
    /// template.
    pub fn naming(mut self, hook: NamingHook) -> Self {
        self.naming = Some(hook);
        self
    }

    pub fn build(self) -> Arc<ModelClass> {
        Arc::new(ModelClass {
            name: self.name,
            base: Some(
                self.base
                    .unwrap_or_else(|| ModelClass::root().clone()),
            ),
            root: false,
            parameters: self.parameters,
            concrete: false,
            fields: self.fields,
            validators: self.validators,
            config: self
                .config
                .unwrap_or_else(|| Arc::new(ModelConfig::default())),
            naming: self.naming,
        })
    }
}
