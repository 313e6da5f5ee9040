//! WGSL sources for the viewer.
//!
//! One module, two pipelines: camera-facing particle discs drawn as
//! instanced quads, and connection lines drawn as a line list. Both apply
//! exponential-squared fog toward the background color.

pub const SCENE_SHADER: &str = r#"
struct Uniforms {
    view_proj: mat4x4<f32>,
    camera_right: vec4<f32>,
    camera_up: vec4<f32>,
    // xyz: camera position, w: fog density
    camera_position: vec4<f32>,
    // rgb: particle color, w: base disc radius
    particle_color: vec4<f32>,
    // rgb: line color, w: line opacity
    line_color: vec4<f32>,
    fog_color: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

fn fog_factor(world_pos: vec3<f32>) -> f32 {
    let density = uniforms.camera_position.w;
    let depth = distance(world_pos, uniforms.camera_position.xyz);
    return clamp(1.0 - exp(-density * density * depth * depth), 0.0, 1.0);
}

struct ParticleOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) uv: vec2<f32>,
    @location(1) opacity: f32,
    @location(2) fog: f32,
};

@vertex
fn vs_particle(
    @builtin(vertex_index) vertex_index: u32,
    @location(0) position: vec3<f32>,
    @location(1) scale: f32,
    @location(2) opacity: f32,
) -> ParticleOutput {
    var quad_vertices = array<vec2<f32>, 6>(
        vec2<f32>(-1.0, -1.0),
        vec2<f32>( 1.0, -1.0),
        vec2<f32>(-1.0,  1.0),
        vec2<f32>(-1.0,  1.0),
        vec2<f32>( 1.0, -1.0),
        vec2<f32>( 1.0,  1.0),
    );

    let corner = quad_vertices[vertex_index];
    let radius = uniforms.particle_color.w * scale;
    let world_pos = position
        + uniforms.camera_right.xyz * (corner.x * radius)
        + uniforms.camera_up.xyz * (corner.y * radius);

    var out: ParticleOutput;
    out.clip_position = uniforms.view_proj * vec4<f32>(world_pos, 1.0);
    out.uv = corner;
    out.opacity = opacity;
    out.fog = fog_factor(world_pos);
    return out;
}

@fragment
fn fs_particle(in: ParticleOutput) -> @location(0) vec4<f32> {
    if length(in.uv) > 1.0 {
        discard;
    }
    let color = mix(uniforms.particle_color.rgb, uniforms.fog_color.rgb, in.fog);
    return vec4<f32>(color, in.opacity);
}

struct LineOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) fog: f32,
};

@vertex
fn vs_line(@location(0) position: vec3<f32>) -> LineOutput {
    var out: LineOutput;
    out.clip_position = uniforms.view_proj * vec4<f32>(position, 1.0);
    out.fog = fog_factor(position);
    return out;
}

@fragment
fn fs_line(in: LineOutput) -> @location(0) vec4<f32> {
    let color = mix(uniforms.line_color.rgb, uniforms.fog_color.rgb, in.fog);
    return vec4<f32>(color, uniforms.line_color.w);
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    /// Validates WGSL code using naga.
    fn validate_wgsl(code: &str) -> Result<naga::Module, String> {
        let module = naga::front::wgsl::parse_str(code)
            .map_err(|e| format!("WGSL parse error: {:?}", e))?;

        let mut validator = naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::all(),
        );
        validator
            .validate(&module)
            .map_err(|e| format!("WGSL validation error: {:?}", e))?;

        Ok(module)
    }

    #[test]
    fn test_scene_shader_is_valid() {
        let module = validate_wgsl(SCENE_SHADER).expect("scene WGSL should be valid");
        let entry_points: Vec<&str> = module
            .entry_points
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        for name in ["vs_particle", "fs_particle", "vs_line", "fs_line"] {
            assert!(entry_points.contains(&name), "missing entry point {}", name);
        }
    }
}
