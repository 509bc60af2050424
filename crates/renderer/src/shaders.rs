//! WGSL sources for the two presentation pipelines.
//!
//! The kernels run on the CPU; these shaders only put finished data on
//! screen. `BLIT` stretches the per-tick RGBA frame over a fullscreen
//! triangle, `MESH` draws the displaced blob with a fixed headlight and a
//! gradient lookup tinted by vertex height.

pub const BLIT: &str = r#"
struct VsOut {
    @builtin(position) pos: vec4<f32>,
    @location(0) uv: vec2<f32>,
};

@vertex
fn vs_main(@builtin(vertex_index) index: u32) -> VsOut {
    var out: VsOut;
    let uv = vec2<f32>(f32((index << 1u) & 2u), f32(index & 2u));
    out.pos = vec4<f32>(uv * 2.0 - 1.0, 0.0, 1.0);
    out.uv = vec2<f32>(uv.x, 1.0 - uv.y);
    return out;
}

@group(0) @binding(0) var frame_sampler: sampler;
@group(0) @binding(1) var frame_texture: texture_2d<f32>;

@fragment
fn fs_main(in: VsOut) -> @location(0) vec4<f32> {
    return textureSample(frame_texture, frame_sampler, in.uv);
}
"#;

pub const MESH: &str = r#"
struct Globals {
    mvp: mat4x4<f32>,
    model: mat4x4<f32>,
    light_dir: vec4<f32>,
};

@group(0) @binding(0) var<uniform> globals: Globals;
@group(0) @binding(1) var lut_sampler: sampler;
@group(0) @binding(2) var lut_texture: texture_2d<f32>;

struct VsIn {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
};

struct VsOut {
    @builtin(position) pos: vec4<f32>,
    @location(0) normal: vec3<f32>,
    @location(1) height: f32,
};

@vertex
fn vs_main(in: VsIn) -> VsOut {
    var out: VsOut;
    out.pos = globals.mvp * vec4<f32>(in.position, 1.0);
    out.normal = (globals.model * vec4<f32>(in.normal, 0.0)).xyz;
    out.height = in.position.y;
    return out;
}

@fragment
fn fs_main(in: VsOut) -> @location(0) vec4<f32> {
    let n = normalize(in.normal);
    let intensity = max(dot(n, globals.light_dir.xyz), 0.0);
    let t = clamp(in.height * 0.5 + 0.5, 0.0, 1.0);
    let tint = textureSample(lut_texture, lut_sampler, vec2<f32>(t, 0.5)).rgb;
    return vec4<f32>(tint * intensity, 1.0);
}
"#;
