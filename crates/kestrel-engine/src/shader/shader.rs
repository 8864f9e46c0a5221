use crate::resources::{LoadError, ResourceManager, Transport};

/// Shader pipeline stage.
///
/// Being an enum, an invalid stage value is unrepresentable; the stage also
/// names the shader when no identifier is given.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    /// Human-readable identifier used for labels and diagnostics.
    pub fn identifier(self) -> &'static str {
        match self {
            Self::Vertex => "vertex_shader",
            Self::Fragment => "fragment_shader",
        }
    }
}

/// Outcome of one compile attempt.
///
/// Failure is data, not a panic: `diagnostic` carries the validator's
/// message and the caller decides whether to treat it as fatal.
#[derive(Debug, Clone)]
pub struct CompileReport {
    pub success: bool,
    pub diagnostic: Option<String>,
}

impl CompileReport {
    fn success() -> Self {
        Self {
            success: true,
            diagnostic: None,
        }
    }

    fn failure(diagnostic: impl Into<String>) -> Self {
        Self {
            success: false,
            diagnostic: Some(diagnostic.into()),
        }
    }
}

/// Wraps at most one shader module.
///
/// Lifecycle: [`create`](Self::create) marks the shader live and optionally
/// compiles; [`compile`](Self::compile) recompiles unconditionally from the
/// stored source; [`delete`](Self::delete) releases the module and resets
/// the flags (safe to call when nothing was created). Whether the last
/// compile succeeded is observable through [`is_compiled`](Self::is_compiled)
/// and the returned report.
pub struct Shader<'d> {
    device: &'d wgpu::Device,
    stage: ShaderStage,
    identifier: String,
    source: Option<String>,
    module: Option<wgpu::ShaderModule>,
    valid: bool,
    compiled: bool,
}

impl<'d> Shader<'d> {
    /// Creates a shader handle with an identifier derived from the stage.
    pub fn new(device: &'d wgpu::Device, stage: ShaderStage) -> Self {
        Self::with_identifier(device, stage, stage.identifier())
    }

    /// Creates a shader handle with a custom identifier.
    pub fn with_identifier(
        device: &'d wgpu::Device,
        stage: ShaderStage,
        identifier: impl Into<String>,
    ) -> Self {
        Self {
            device,
            stage,
            identifier: identifier.into(),
            source: None,
            module: None,
            valid: false,
            compiled: false,
        }
    }

    /// Marks the shader live, stores `source`, and compiles when both a
    /// source is present and `compile` is set.
    ///
    /// `create(None, true)` stores nothing and never compiles. Returns the
    /// compile report when a compile ran.
    pub fn create(&mut self, source: Option<&str>, compile: bool) -> Option<CompileReport> {
        self.module = None;
        self.compiled = false;
        self.source = source.map(str::to_owned);
        self.valid = true;

        if compile && self.source.is_some() {
            Some(self.compile())
        } else {
            None
        }
    }

    /// Loads source text through the resource manager, then creates and
    /// compiles.
    ///
    /// Loader failures propagate untouched; a loaded-but-invalid source is
    /// a successful `Ok` carrying a failed report.
    pub async fn create_from_file<T: Transport>(
        &mut self,
        manager: &mut ResourceManager<T>,
        path: &str,
    ) -> Result<CompileReport, LoadError> {
        let source = manager.load_text_file(path, false, false).await?;
        self.create(Some(&source), false);
        Ok(self.compile())
    }

    /// Uploads the stored source and compiles it.
    ///
    /// Recompiles unconditionally on every call. Compilation happens inside
    /// a validation error scope, so invalid source produces a failed report
    /// (also logged) instead of a panic.
    pub fn compile(&mut self) -> CompileReport {
        if !self.valid {
            return CompileReport::failure("shader has not been created");
        }

        let Some(source) = self.source.as_deref() else {
            return CompileReport::failure("shader has no source attached");
        };

        let error_scope = self
            .device
            .push_error_scope(wgpu::ErrorFilter::Validation);
        let module = self
            .device
            .create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some(self.identifier.as_str()),
                source: wgpu::ShaderSource::Wgsl(source.into()),
            });
        let error = pollster::block_on(error_scope.pop());

        match error {
            None => {
                self.module = Some(module);
                self.compiled = true;
                CompileReport::success()
            }
            Some(err) => {
                self.module = None;
                self.compiled = false;
                let diagnostic = err.to_string();
                log::error!("failed to compile shader '{}': {diagnostic}", self.identifier);
                CompileReport::failure(diagnostic)
            }
        }
    }

    /// Releases the module and resets the valid/compiled flags.
    ///
    /// The stored source survives, so a later `create`/`compile` can reuse
    /// it. No-op when nothing was created.
    pub fn delete(&mut self) {
        self.module = None;
        self.valid = false;
        self.compiled = false;
    }

    /// Replaces the stored source without compiling.
    pub fn set_source(&mut self, source: impl Into<String>) {
        self.source = Some(source.into());
    }

    pub fn device(&self) -> &'d wgpu::Device {
        self.device
    }

    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// The compiled module, present only after a successful compile.
    pub fn module(&self) -> Option<&wgpu::ShaderModule> {
        self.module.as_ref()
    }

    /// Whether [`create`](Self::create) has run since the last delete.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Whether the last compile succeeded.
    pub fn is_compiled(&self) -> bool {
        self.compiled
    }
}
