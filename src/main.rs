// Motion engine demo: floating nav items, parallax star layers, and an
// edge-shifted HUD marker, all instanced quads drawn in one pass.
// F3 toggles the debug overlay, left click activates an item, Escape quits.

mod overlay;

use winit::{
    event::{ElementState, Event as WinitEvent, KeyEvent, MouseButton, WindowEvent},
    event_loop::EventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::Window,
};

use bevy_ecs::prelude::*;
use glam::{Mat4, Vec2};
use log::info;

use cursor_drift::motion::{
    ClickAction, EdgeShiftConfig, EdgeShifted, FloatAnimator, FloatConfig, FloatMotion, Hoverable,
    Interaction, InteractionState, ItemLayout, Navigator, ParallaxLayer, PointerTracker,
    SpinAnimator, SpinConfig, VisualOutput,
    systems::{activate_at, advance_pass, compose_output_pass, pointer_left_pass, pointer_react_pass},
};
use overlay::{DebugOverlay, DebugStats, ItemRow};

// ============================================================================
// VERTEX DEFINITION
// ============================================================================

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct Vertex {
    corner: [f32; 2],
}

impl Vertex {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x2,
            }],
        }
    }
}

// Unit quad in corner space [-1, 1]².
const QUAD_VERTICES: &[Vertex] = &[
    Vertex { corner: [-1.0, -1.0] },
    Vertex { corner: [1.0, -1.0] },
    Vertex { corner: [1.0, 1.0] },
    Vertex { corner: [-1.0, 1.0] },
];

const QUAD_INDICES: &[u16] = &[0, 1, 2, 0, 2, 3];

// ============================================================================
// INSTANCE DATA (per quad)
// ============================================================================

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct InstanceData {
    center: [f32; 2],
    half_size: [f32; 2],
    color: [f32; 4],
    /// x = rotation (radians), y = scale, z = glow, w = unused
    params: [f32; 4],
}

impl InstanceData {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<InstanceData>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: 8,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: 16,
                    shader_location: 3,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: 32,
                    shader_location: 4,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

// ============================================================================
// UNIFORM DATA (2D camera)
// ============================================================================

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct Uniforms {
    view_proj: [[f32; 4]; 4],
}

impl Uniforms {
    fn for_viewport(width: f32, height: f32) -> Self {
        // Pixel coordinates, origin top-left, matching pointer events.
        let proj = Mat4::orthographic_rh(0.0, width.max(1.0), height.max(1.0), 0.0, -1.0, 1.0);
        Self { view_proj: proj.to_cols_array_2d() }
    }
}

// ============================================================================
// DEMO ITEMS
// ============================================================================

/// Demo-side presentation data living next to the engine components.
#[derive(Component)]
struct ItemSkin {
    label: &'static str,
    color: [f32; 3],
}

const NAV_ITEMS: &[(&str, [f32; 3])] = &[
    ("Projects", [0.20, 0.83, 1.00]),
    ("Skills", [0.66, 0.33, 0.97]),
    ("Education", [0.06, 0.73, 0.51]),
    ("CV", [0.23, 0.51, 0.96]),
    ("Connect", [0.93, 0.28, 0.60]),
];

const PARALLAX_LAYERS: usize = 4;
const STARS_PER_LAYER: usize = 40;

/// Demo navigator: the action boundary just logs what a host page would do.
struct LogNavigator;

impl Navigator for LogNavigator {
    fn scroll_to(&mut self, selector: &str) -> anyhow::Result<()> {
        info!("scroll to {selector}");
        Ok(())
    }

    fn open_external(&mut self, url: &str) -> anyhow::Result<()> {
        info!("open external {url}");
        Ok(())
    }
}

// ============================================================================
// APPLICATION STATE
// ============================================================================

struct State {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    size: winit::dpi::PhysicalSize<u32>,
    render_pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    instance_buffer: wgpu::Buffer,
    num_indices: u32,
    max_instances: usize,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,

    overlay: DebugOverlay,

    // Motion engine
    world: World,
    tracker: PointerTracker,
    navigator: LogNavigator,
    last_update: std::time::Instant,
    last_cursor: Vec2,

    // Per-layer local star positions; the engine moves each whole layer
    // through its VisualOutput offset.
    star_layers: Vec<Vec<Vec2>>,
    layer_entities: Vec<Entity>,
    hud_entity: Entity,

    // Overlay stats
    frame_times_ms: Vec<f32>,
    stats: DebugStats,
}

impl State {
    async fn new(window: std::sync::Arc<winit::window::Window>) -> Self {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance.create_surface(window.clone()).unwrap();

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .unwrap();

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: None,
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::default(),
                },
                None,
            )
            .await
            .unwrap();

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width,
            height: size.height,
            present_mode: surface_caps.present_modes[0],
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shader_instanced.wgsl").into()),
        });

        let uniforms = Uniforms::for_viewport(size.width as f32, size.height as f32);

        use wgpu::util::DeviceExt;

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Uniform Buffer"),
            contents: bytemuck::cast_slice(&[uniforms]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let uniform_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
                label: Some("uniform_bind_group_layout"),
            });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &uniform_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
            label: Some("uniform_bind_group"),
        });

        let render_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Render Pipeline Layout"),
                bind_group_layouts: &[&uniform_bind_group_layout],
                push_constant_ranges: &[],
            });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Render Pipeline"),
            layout: Some(&render_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::desc(), InstanceData::desc()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        });

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Vertex Buffer"),
            contents: bytemuck::cast_slice(QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Index Buffer"),
            contents: bytemuck::cast_slice(QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });

        let max_instances = 1024;
        let instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Instance Buffer"),
            size: (max_instances * std::mem::size_of::<InstanceData>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let num_indices = QUAD_INDICES.len() as u32;

        let overlay = DebugOverlay::new(&window, &device, surface_format);

        // Motion engine world
        let mut world = World::new();
        let viewport = Vec2::new(size.width.max(1) as f32, size.height.max(1) as f32);
        spawn_nav_items(&mut world, viewport);
        let (star_layers, layer_entities) = spawn_star_layers(&mut world, viewport);
        let hud_entity = world
            .spawn((
                EdgeShifted { config: EdgeShiftConfig::default() },
                VisualOutput::default(),
            ))
            .id();

        let mut tracker = PointerTracker::new();
        tracker.set_viewport(viewport.x, viewport.y);

        let stats = DebugStats {
            fps: 0,
            frame_time_avg_ms: 0.0,
            frame_time_min_ms: 0.0,
            frame_time_max_ms: 0.0,
            item_count: NAV_ITEMS.len(),
            pointer: (0.0, 0.0),
            pointer_active: false,
            resolution: (size.width, size.height),
        };

        Self {
            surface,
            device,
            queue,
            config,
            size,
            render_pipeline,
            vertex_buffer,
            index_buffer,
            instance_buffer,
            num_indices,
            max_instances,
            uniform_buffer,
            uniform_bind_group,
            overlay,
            world,
            tracker,
            navigator: LogNavigator,
            last_update: std::time::Instant::now(),
            last_cursor: Vec2::ZERO,
            star_layers,
            layer_entities,
            hud_entity,
            frame_times_ms: Vec::new(),
            stats,
        }
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
            self.tracker
                .set_viewport(new_size.width as f32, new_size.height as f32);
            self.stats.resolution = (new_size.width, new_size.height);
        }
    }

    fn update(&mut self) {
        let now = std::time::Instant::now();
        let dt = (now - self.last_update).as_secs_f32().min(0.1);
        self.last_update = now;

        // One upstream-to-downstream propagation per frame.
        self.tracker.commit_frame();
        pointer_react_pass(&mut self.world, &self.tracker);
        advance_pass(&mut self.world, dt, &mut self.navigator);
        compose_output_pass(&mut self.world, &self.tracker);

        self.stats.pointer = (self.tracker.position().x, self.tracker.position().y);
        self.stats.pointer_active = self.tracker.is_active();
    }

    fn collect_instances(&mut self) -> Vec<InstanceData> {
        let mut instances = Vec::new();

        // Background star layers, shallowest first.
        for (layer_idx, entity) in self.layer_entities.iter().enumerate() {
            let offset = self
                .world
                .get::<VisualOutput>(*entity)
                .map(|v| v.offset)
                .unwrap_or(Vec2::ZERO);
            let depth = (layer_idx + 1) as f32 / PARALLAX_LAYERS as f32;
            for star in &self.star_layers[layer_idx] {
                let pos = *star + offset;
                instances.push(InstanceData {
                    center: [pos.x, pos.y],
                    half_size: [1.0 + depth * 2.0; 2],
                    color: [0.35, 0.55, 0.95, 0.25 + depth * 0.35],
                    params: [0.0, 1.0, 0.0, 0.0],
                });
            }
        }

        // Edge-shifted HUD marker, anchored near the bottom-left corner.
        if let Some(output) = self.world.get::<VisualOutput>(self.hud_entity) {
            let base = Vec2::new(80.0, self.size.height as f32 - 80.0);
            let pos = base + output.offset;
            instances.push(InstanceData {
                center: [pos.x, pos.y],
                half_size: [24.0, 24.0],
                color: [0.95, 0.75, 0.20, 0.9],
                params: [0.0, 1.0, 0.2, 0.0],
            });
        }

        // Interactive nav items on top.
        let mut query = self.world.query::<(&ItemLayout, &VisualOutput, &ItemSkin)>();
        for (layout, output, skin) in query.iter(&self.world) {
            let pos = layout.base + output.offset;
            let spin = (output.spin_deg.z + output.click_rotation).to_radians();
            // Tilt has no depth axis on a flat quad; it modulates brightness
            // instead, with the color phase breathing on top.
            let lean = (output.tilt_deg.length() / 20.0).min(1.0);
            let brightness = (0.8 + 0.4 * output.color_phase) * (1.0 + 0.25 * lean);
            instances.push(InstanceData {
                center: [pos.x, pos.y],
                half_size: [layout.size.x * 0.5, layout.size.y * 0.5],
                color: [
                    (skin.color[0] * brightness).min(1.0),
                    (skin.color[1] * brightness).min(1.0),
                    (skin.color[2] * brightness).min(1.0),
                    0.92,
                ],
                params: [spin, output.scale, output.glow, 0.0],
            });
        }

        instances
    }

    fn item_rows(&mut self) -> Vec<ItemRow> {
        let mut rows = Vec::new();
        let mut query = self.world.query::<(&ItemSkin, &Hoverable)>();
        for (skin, hoverable) in query.iter(&self.world) {
            rows.push(ItemRow {
                label: skin.label.to_string(),
                state: state_name(hoverable.interaction.state()),
                damping: hoverable.interaction.damping(),
                glow: hoverable.interaction.glow(),
            });
        }
        rows
    }

    fn render(&mut self, window: &Window) -> Result<(), wgpu::SurfaceError> {
        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        // Collect instance data BEFORE opening the render pass.
        let instances = self.collect_instances();
        let instance_count = instances.len().min(self.max_instances);

        if !instances.is_empty() {
            self.queue.write_buffer(
                &self.instance_buffer,
                0,
                bytemuck::cast_slice(&instances[..instance_count]),
            );
        }

        let uniforms = Uniforms::for_viewport(self.size.width as f32, self.size.height as f32);
        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[uniforms]));

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.02,
                            g: 0.02,
                            b: 0.06,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_pipeline(&self.render_pipeline);
            render_pass.set_bind_group(0, &self.uniform_bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
            render_pass.set_vertex_buffer(1, self.instance_buffer.slice(..));
            render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint16);

            render_pass.draw_indexed(0..self.num_indices, 0, 0..instance_count as u32);
        }

        if self.overlay.visible {
            let rows = self.item_rows();
            let screen_descriptor = egui_wgpu::ScreenDescriptor {
                size_in_pixels: [self.config.width, self.config.height],
                pixels_per_point: window.scale_factor() as f32,
            };
            self.overlay.render(
                &self.device,
                &self.queue,
                &mut encoder,
                window,
                &view,
                &screen_descriptor,
                &self.stats,
                &rows,
            );
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

fn state_name(state: InteractionState) -> &'static str {
    match state {
        InteractionState::Idle => "Idle",
        InteractionState::ApproachingHover => "Approaching",
        InteractionState::DirectHover => "DirectHover",
        InteractionState::Clicking => "Clicking",
        InteractionState::Navigating => "Navigating",
    }
}

// ============================================================================
// ENTITY SPAWNING
// ============================================================================

fn spawn_nav_items(world: &mut World, viewport: Vec2) {
    use rand::Rng;
    let mut rng = rand::thread_rng();

    let count = NAV_ITEMS.len();
    for (idx, (label, color)) in NAV_ITEMS.iter().enumerate() {
        // Spread the anchors across the upper half of the viewport.
        let base = Vec2::new(
            viewport.x * (idx as f32 + 1.0) / (count as f32 + 1.0),
            viewport.y * 0.3,
        );

        // Unique phases decorrelate the drift paths.
        let float_phase = rng.gen_range(0.0..std::f32::consts::TAU);
        let spin_phase = rng.gen_range(0.0..std::f32::consts::TAU);

        let action = match *label {
            "Connect" => ClickAction::OpenExternal("https://example.com/connect".into()),
            _ => ClickAction::ScrollTo(format!("#{}", label.to_lowercase())),
        };

        world.spawn((
            ItemLayout::new(base, Vec2::new(140.0, 64.0)),
            FloatMotion {
                float: FloatAnimator::with_phase(FloatConfig::default(), float_phase),
                spin: SpinAnimator::with_phase(SpinConfig::default(), spin_phase),
            },
            Hoverable::new(Interaction::new(action)),
            VisualOutput::default(),
            ItemSkin { label, color: *color },
        ));
    }

    info!("spawned {count} nav items");
}

fn spawn_star_layers(world: &mut World, viewport: Vec2) -> (Vec<Vec<Vec2>>, Vec<Entity>) {
    use rand::Rng;
    let mut rng = rand::thread_rng();

    let mut star_layers = Vec::with_capacity(PARALLAX_LAYERS);
    let mut entities = Vec::with_capacity(PARALLAX_LAYERS);

    for depth in 0..PARALLAX_LAYERS {
        let stars = (0..STARS_PER_LAYER)
            .map(|_| {
                Vec2::new(
                    rng.gen_range(0.0..viewport.x.max(1.0)),
                    rng.gen_range(0.0..viewport.y.max(1.0)),
                )
            })
            .collect();
        star_layers.push(stars);

        let entity = world
            .spawn((ParallaxLayer::new(depth), VisualOutput::default()))
            .id();
        entities.push(entity);
    }

    (star_layers, entities)
}

// ============================================================================
// MAIN
// ============================================================================

fn main() {
    env_logger::init();

    let event_loop = EventLoop::new().unwrap();

    #[allow(deprecated)]
    let window = std::sync::Arc::new(
        event_loop
            .create_window(
                Window::default_attributes()
                    .with_title("cursor_drift — floating items demo (F3: overlay)")
                    .with_inner_size(winit::dpi::LogicalSize::new(1280, 720)),
            )
            .unwrap(),
    );

    let mut state = pollster::block_on(State::new(window.clone()));
    let mut frame_count = 0u32;
    let mut last_fps_update = std::time::Instant::now();
    let mut last_frame = std::time::Instant::now();

    #[allow(deprecated)]
    event_loop
        .run(move |event, control_flow| {
            match event {
                WinitEvent::WindowEvent {
                    ref event,
                    window_id,
                } if window_id == window.id() => {
                    let _ = state.overlay.handle_window_event(&window, event);

                    match event {
                        WindowEvent::CloseRequested
                        | WindowEvent::KeyboardInput {
                            event:
                                KeyEvent {
                                    state: ElementState::Pressed,
                                    physical_key: PhysicalKey::Code(KeyCode::Escape),
                                    ..
                                },
                            ..
                        } => control_flow.exit(),
                        WindowEvent::KeyboardInput {
                            event:
                                KeyEvent {
                                    state: ElementState::Pressed,
                                    physical_key: PhysicalKey::Code(KeyCode::F3),
                                    ..
                                },
                            ..
                        } => state.overlay.toggle(),
                        WindowEvent::CursorMoved { position, .. } => {
                            state.last_cursor = Vec2::new(position.x as f32, position.y as f32);
                            state
                                .tracker
                                .record_move(position.x as f32, position.y as f32);
                        }
                        WindowEvent::CursorLeft { .. } => {
                            state.tracker.record_leave();
                            pointer_left_pass(&mut state.world);
                        }
                        WindowEvent::MouseInput {
                            state: ElementState::Pressed,
                            button: MouseButton::Left,
                            ..
                        } => {
                            let point = state.last_cursor;
                            activate_at(&mut state.world, point);
                        }
                        WindowEvent::Resized(physical_size) => {
                            state.resize(*physical_size);
                        }
                        WindowEvent::RedrawRequested => {
                            state.update();
                            match state.render(&window) {
                                Ok(_) => {}
                                Err(wgpu::SurfaceError::Lost) => state.resize(state.size),
                                Err(wgpu::SurfaceError::OutOfMemory) => control_flow.exit(),
                                Err(e) => eprintln!("{:?}", e),
                            }

                            let now = std::time::Instant::now();
                            state
                                .frame_times_ms
                                .push((now - last_frame).as_secs_f32() * 1000.0);
                            last_frame = now;

                            frame_count += 1;
                            if (now - last_fps_update).as_secs_f32() >= 1.0 {
                                let times = &state.frame_times_ms;
                                let avg = times.iter().sum::<f32>() / times.len().max(1) as f32;
                                let min = times.iter().copied().fold(f32::INFINITY, f32::min);
                                let max = times.iter().copied().fold(0.0f32, f32::max);
                                state.stats.fps = frame_count;
                                state.stats.frame_time_avg_ms = avg;
                                state.stats.frame_time_min_ms =
                                    if min.is_finite() { min } else { 0.0 };
                                state.stats.frame_time_max_ms = max;
                                state.frame_times_ms.clear();
                                frame_count = 0;
                                last_fps_update = now;
                            }
                        }
                        _ => {}
                    }
                }
                WinitEvent::AboutToWait => {
                    window.request_redraw();
                }
                _ => {}
            }
        })
        .unwrap();
}
