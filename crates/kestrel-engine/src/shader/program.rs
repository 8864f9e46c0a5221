use crate::render::DEPTH_FORMAT;

use super::shader::{Shader, ShaderStage};

/// Outcome of one link attempt, mirroring
/// [`CompileReport`](super::CompileReport).
#[derive(Debug, Clone)]
pub struct LinkReport {
    pub success: bool,
    pub diagnostic: Option<String>,
}

impl LinkReport {
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

/// Link-time parameters.
///
/// Entry points follow the common WGSL naming convention. Vertex buffer
/// layouts default to none (vertex pulling or full-screen shaders).
pub struct ProgramInit<'a> {
    pub surface_format: wgpu::TextureFormat,
    pub vertex_entry: &'a str,
    pub fragment_entry: &'a str,
    pub vertex_buffers: &'a [wgpu::VertexBufferLayout<'a>],

    /// Depth testing against the engine's depth buffer. On by default,
    /// matching the renderer's configured state.
    pub depth_test: bool,
}

impl ProgramInit<'_> {
    pub fn new(surface_format: wgpu::TextureFormat) -> Self {
        Self {
            surface_format,
            vertex_entry: "vs_main",
            fragment_entry: "fs_main",
            vertex_buffers: &[],
            depth_test: true,
        }
    }
}

/// A linked vertex+fragment pipeline.
///
/// Link failures are data: [`Program::link`] always returns a program plus a
/// [`LinkReport`]; an unlinked program simply has no pipeline to bind.
pub struct Program {
    pipeline: Option<wgpu::RenderPipeline>,
}

impl Program {
    /// Links `vertex` and `fragment` into a render pipeline.
    ///
    /// Both shaders must have compiled successfully. The pipeline uses the
    /// engine defaults: counter-clockwise front face, back-face culling,
    /// depth test (`LessEqual`) when `depth_test` is on. Pipeline creation
    /// runs inside a validation error scope, so interface mismatches
    /// produce a failed report instead of a panic.
    pub fn link(
        device: &wgpu::Device,
        vertex: &Shader<'_>,
        fragment: &Shader<'_>,
        init: &ProgramInit<'_>,
    ) -> (Self, LinkReport) {
        let unlinked = Self { pipeline: None };

        if vertex.stage() != ShaderStage::Vertex || fragment.stage() != ShaderStage::Fragment {
            return (
                unlinked,
                LinkReport::failure("link requires one vertex and one fragment shader"),
            );
        }

        let (Some(vs_module), Some(fs_module)) = (vertex.module(), fragment.module()) else {
            let missing = if vertex.module().is_none() {
                vertex.identifier()
            } else {
                fragment.identifier()
            };
            return (
                unlinked,
                LinkReport::failure(format!("shader '{missing}' is not compiled")),
            );
        };

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("kestrel program layout"),
            bind_group_layouts: &[],
            immediate_size: 0,
        });

        let error_scope = device.push_error_scope(wgpu::ErrorFilter::Validation);
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("kestrel program pipeline"),
            layout: Some(&layout),

            vertex: wgpu::VertexState {
                module: vs_module,
                entry_point: Some(init.vertex_entry),
                compilation_options: Default::default(),
                buffers: init.vertex_buffers,
            },

            fragment: Some(wgpu::FragmentState {
                module: fs_module,
                entry_point: Some(init.fragment_entry),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: init.surface_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: default_primitive_state(),
            depth_stencil: init.depth_test.then(default_depth_state),
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });
        let error = pollster::block_on(error_scope.pop());

        match error {
            None => (
                Self {
                    pipeline: Some(pipeline),
                },
                LinkReport::success(),
            ),
            Some(err) => {
                let diagnostic = err.to_string();
                log::error!(
                    "failed to link program ('{}' + '{}'): {diagnostic}",
                    vertex.identifier(),
                    fragment.identifier()
                );
                (unlinked, LinkReport::failure(diagnostic))
            }
        }
    }

    /// The linked pipeline, present only after a successful link.
    pub fn pipeline(&self) -> Option<&wgpu::RenderPipeline> {
        self.pipeline.as_ref()
    }

    pub fn is_linked(&self) -> bool {
        self.pipeline.is_some()
    }
}

/// Default rasterizer state: counter-clockwise front face, cull back faces.
pub(crate) fn default_primitive_state() -> wgpu::PrimitiveState {
    wgpu::PrimitiveState {
        topology: wgpu::PrimitiveTopology::TriangleList,
        strip_index_format: None,
        front_face: wgpu::FrontFace::Ccw,
        cull_mode: Some(wgpu::Face::Back),
        polygon_mode: wgpu::PolygonMode::Fill,
        unclipped_depth: false,
        conservative: false,
    }
}

/// Default depth state against the engine depth buffer.
pub(crate) fn default_depth_state() -> wgpu::DepthStencilState {
    wgpu::DepthStencilState {
        format: DEPTH_FORMAT,
        depth_write_enabled: true,
        depth_compare: wgpu::CompareFunction::LessEqual,
        stencil: wgpu::StencilState::default(),
        bias: wgpu::DepthBiasState::default(),
    }
}
