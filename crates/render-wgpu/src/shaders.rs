/// WGSL shader for meshes lit by the packed scene lights.
pub const LIT_SHADER: &str = r#"
struct Camera {
    view_proj: mat4x4<f32>,
    eye: vec4<f32>,
};

struct Light {
    color: vec4<f32>,
    position: vec4<f32>,
    direction: vec4<f32>,
    params: vec4<f32>,
};

struct Lights {
    count: vec4<u32>,
    items: array<Light, 8>,
};

@group(0) @binding(0)
var<uniform> camera: Camera;

@group(0) @binding(1)
var<uniform> lights: Lights;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
};

struct InstanceInput {
    @location(2) model_0: vec4<f32>,
    @location(3) model_1: vec4<f32>,
    @location(4) model_2: vec4<f32>,
    @location(5) model_3: vec4<f32>,
    @location(6) color: vec4<f32>,
    @location(7) params: vec4<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_position: vec3<f32>,
    @location(1) world_normal: vec3<f32>,
    @location(2) color: vec4<f32>,
    @location(3) params: vec4<f32>,
};

@vertex
fn vs_main(vertex: VertexInput, instance: InstanceInput) -> VertexOutput {
    let model = mat4x4<f32>(
        instance.model_0,
        instance.model_1,
        instance.model_2,
        instance.model_3,
    );
    let world_pos = model * vec4<f32>(vertex.position, 1.0);
    let world_normal = (model * vec4<f32>(vertex.normal, 0.0)).xyz;

    var out: VertexOutput;
    out.clip_position = camera.view_proj * world_pos;
    out.world_position = world_pos.xyz;
    out.world_normal = normalize(world_normal);
    out.color = instance.color;
    out.params = instance.params;
    return out;
}

fn range_attenuation(d: f32, cutoff: f32, decay: f32) -> f32 {
    var att = 1.0 / max(pow(d, decay), 0.01);
    if (cutoff > 0.0) {
        let ratio = clamp(1.0 - pow(d / cutoff, 4.0), 0.0, 1.0);
        att = att * ratio * ratio;
    }
    return att;
}

fn shade(l: vec3<f32>, radiance: vec3<f32>, n: vec3<f32>, v: vec3<f32>, albedo: vec3<f32>, shininess: f32) -> vec3<f32> {
    let n_dot_l = max(dot(n, l), 0.0);
    let h = normalize(l + v);
    let highlight = pow(max(dot(n, h), 0.0), shininess) * (shininess + 2.0) / 8.0;
    return radiance * n_dot_l * (albedo + vec3<f32>(0.04 * highlight));
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    var n = normalize(in.world_normal);
    let v = normalize(camera.eye.xyz - in.world_position);
    if (dot(n, v) < 0.0) {
        n = -n;
    }
    let albedo = in.color.rgb;

    // Unlit: a view-dependent falloff standing in for a matcap lookup.
    if (in.params.x > 0.5) {
        let facing = abs(dot(n, v));
        return vec4<f32>(albedo * (0.55 + 0.45 * facing), in.color.a);
    }

    let roughness = clamp(in.params.y, 0.04, 1.0);
    let r4 = roughness * roughness * roughness * roughness;
    let shininess = clamp(2.0 / max(r4, 0.0001) - 2.0, 1.0, 2048.0);

    var total = vec3<f32>(0.0);
    let count = min(lights.count.x, 8u);
    for (var i = 0u; i < count; i = i + 1u) {
        let light = lights.items[i];
        let kind = u32(light.color.w + 0.5);
        let radiance = light.color.rgb;
        switch kind {
            case 0u: {
                total += radiance * albedo;
            }
            case 1u: {
                total += shade(-light.direction.xyz, radiance, n, v, albedo, shininess);
            }
            case 2u: {
                let w = 0.5 * dot(n, light.direction.xyz) + 0.5;
                total += mix(light.params.xyz, radiance, w) * albedo;
            }
            case 3u: {
                let to_light = light.position.xyz - in.world_position;
                let d = length(to_light);
                let l = to_light / max(d, 0.0001);
                let att = range_attenuation(d, light.position.w, light.params.y);
                total += shade(l, radiance * att, n, v, albedo, shininess);
            }
            case 4u: {
                let to_light = light.position.xyz - in.world_position;
                let d = length(to_light);
                let l = to_light / max(d, 0.0001);
                let cos_angle = dot(-l, light.direction.xyz);
                var cone = step(light.direction.w, cos_angle);
                if (light.params.x - light.direction.w > 0.0001) {
                    cone = smoothstep(light.direction.w, light.params.x, cos_angle);
                }
                let att = range_attenuation(d, light.position.w, light.params.y) * cone;
                total += shade(l, radiance * att, n, v, albedo, shininess);
            }
            case 5u: {
                // Approximated as a one-sided emitter at the rectangle centre.
                let to_light = light.position.xyz - in.world_position;
                let d = length(to_light);
                let l = to_light / max(d, 0.0001);
                let facing = max(dot(-l, light.direction.xyz), 0.0);
                let area = light.params.x * light.params.y;
                let att = facing * area / max(d * d, 0.01);
                total += shade(l, radiance * att, n, v, albedo, shininess);
            }
            default: {}
        }
    }
    return vec4<f32>(total, in.color.a);
}
"#;

/// WGSL shader for light helper lines.
pub const LINE_SHADER: &str = r#"
struct Camera {
    view_proj: mat4x4<f32>,
    eye: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> camera: Camera;

struct LineVertex {
    @location(0) position: vec3<f32>,
    @location(1) color: vec4<f32>,
};

struct LineOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec4<f32>,
};

@vertex
fn vs_line(vertex: LineVertex) -> LineOutput {
    var out: LineOutput;
    out.clip_position = camera.view_proj * vec4<f32>(vertex.position, 1.0);
    out.color = vertex.color;
    return out;
}

@fragment
fn fs_line(in: LineOutput) -> @location(0) vec4<f32> {
    return in.color;
}
"#;

/// WGSL shader copying the offscreen drawing buffer onto the surface.
pub const BLIT_SHADER: &str = r#"
@group(0) @binding(0)
var frame_texture: texture_2d<f32>;

@group(0) @binding(1)
var frame_sampler: sampler;

struct BlitOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) uv: vec2<f32>,
};

// One triangle covering the screen.
@vertex
fn vs_blit(@builtin(vertex_index) index: u32) -> BlitOutput {
    let uv = vec2<f32>(f32((index << 1u) & 2u), f32(index & 2u));
    var out: BlitOutput;
    out.clip_position = vec4<f32>(uv * vec2<f32>(2.0, -2.0) + vec2<f32>(-1.0, 1.0), 0.0, 1.0);
    out.uv = uv;
    return out;
}

@fragment
fn fs_blit(in: BlitOutput) -> @location(0) vec4<f32> {
    return textureSample(frame_texture, frame_sampler, in.uv);
}
"#;
