/// WGSL shader for the lit, instanced cubelet faces.
///
/// Each vertex carries its face slot; the instance carries one color per slot.
pub const CUBELET_SHADER: &str = r#"
struct Uniforms {
    view_proj: mat4x4<f32>,
    model: mat4x4<f32>,
    eye: vec4<f32>,
    light_position: vec4<f32>,
    // x: total ambient, y: diffuse, z: specular
    light_terms: vec4<f32>,
    // x: specular reflectance, y: shininess
    material: vec4<f32>,
    border_color: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) slot: u32,
};

struct InstanceInput {
    @location(3) model_0: vec4<f32>,
    @location(4) model_1: vec4<f32>,
    @location(5) model_2: vec4<f32>,
    @location(6) model_3: vec4<f32>,
    @location(7) color_0: vec4<f32>,
    @location(8) color_1: vec4<f32>,
    @location(9) color_2: vec4<f32>,
    @location(10) color_3: vec4<f32>,
    @location(11) color_4: vec4<f32>,
    @location(12) color_5: vec4<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_position: vec3<f32>,
    @location(1) world_normal: vec3<f32>,
    @location(2) color: vec4<f32>,
};

@vertex
fn vs_main(vertex: VertexInput, instance: InstanceInput) -> VertexOutput {
    let instance_model = mat4x4<f32>(
        instance.model_0,
        instance.model_1,
        instance.model_2,
        instance.model_3,
    );
    var colors = array<vec4<f32>, 6>(
        instance.color_0,
        instance.color_1,
        instance.color_2,
        instance.color_3,
        instance.color_4,
        instance.color_5,
    );

    let world_pos = uniforms.model * instance_model * vec4<f32>(vertex.position, 1.0);
    let world_normal = (uniforms.model * vec4<f32>(vertex.normal, 0.0)).xyz;

    var out: VertexOutput;
    out.clip_position = uniforms.view_proj * world_pos;
    out.world_position = world_pos.xyz;
    out.world_normal = normalize(world_normal);
    out.color = colors[min(vertex.slot, 5u)];
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let n = normalize(in.world_normal);
    let l = normalize(uniforms.light_position.xyz - in.world_position);
    let v = normalize(uniforms.eye.xyz - in.world_position);
    let h = normalize(l + v);

    let lambert = max(dot(n, l), 0.0);
    var specular = 0.0;
    if (lambert > 0.0) {
        specular = uniforms.material.x * uniforms.light_terms.z
            * pow(max(dot(n, h), 0.0), uniforms.material.y);
    }

    let lit = in.color.rgb * (uniforms.light_terms.x + uniforms.light_terms.y * lambert)
        + vec3<f32>(specular);
    return vec4<f32>(clamp(lit, vec3<f32>(0.0), vec3<f32>(1.0)), in.color.a);
}
"#;

/// WGSL shader for the unlit border lines around each cubelet.
pub const EDGE_SHADER: &str = r#"
struct Uniforms {
    view_proj: mat4x4<f32>,
    model: mat4x4<f32>,
    eye: vec4<f32>,
    light_position: vec4<f32>,
    light_terms: vec4<f32>,
    material: vec4<f32>,
    border_color: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

struct EdgeInput {
    @location(0) position: vec3<f32>,
};

struct InstanceInput {
    @location(1) model_0: vec4<f32>,
    @location(2) model_1: vec4<f32>,
    @location(3) model_2: vec4<f32>,
    @location(4) model_3: vec4<f32>,
};

@vertex
fn vs_edge(vertex: EdgeInput, instance: InstanceInput) -> @builtin(position) vec4<f32> {
    let instance_model = mat4x4<f32>(
        instance.model_0,
        instance.model_1,
        instance.model_2,
        instance.model_3,
    );
    return uniforms.view_proj * uniforms.model * instance_model * vec4<f32>(vertex.position, 1.0);
}

@fragment
fn fs_edge() -> @location(0) vec4<f32> {
    return uniforms.border_color;
}
"#;
