/// WGSL shader for the textured, directionally lit pyramid.
pub const PYRAMID_SHADER: &str = r#"
struct Uniforms {
    wvp: mat4x4<f32>,
    world: mat4x4<f32>,
    // rgb = light color, a = ambient intensity
    light_color: vec4<f32>,
    // xyz = unit vector toward the light, w = diffuse intensity
    to_light: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

@group(0) @binding(1)
var base_texture: texture_2d<f32>;

@group(0) @binding(2)
var base_sampler: sampler;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) tex_coords: vec2<f32>,
    @location(2) normal: vec3<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) tex_coords: vec2<f32>,
    @location(1) world_normal: vec3<f32>,
};

@vertex
fn vs_main(vertex: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    out.clip_position = uniforms.wvp * vec4<f32>(vertex.position, 1.0);
    out.tex_coords = vertex.tex_coords;
    out.world_normal = (uniforms.world * vec4<f32>(vertex.normal, 0.0)).xyz;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let normal = normalize(in.world_normal);
    let diffuse = max(dot(normal, uniforms.to_light.xyz), 0.0) * uniforms.to_light.w;
    let lighting = uniforms.light_color.rgb * (uniforms.light_color.a + diffuse);
    let base = textureSample(base_texture, base_sampler, in.tex_coords);
    return vec4<f32>(base.rgb * lighting, base.a);
}
"#;
