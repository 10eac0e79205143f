use bevy::pbr::{ExtendedMaterial, MaterialExtension};
use bevy::prelude::*;
use bevy::render::render_resource::{AsBindGroup, ShaderRef, ShaderType};
use constants::screen::{SCREEN_ROUGHNESS, SCREEN_SHADER_PATH};

use crate::engine::tv::Tv;
use crate::engine::tv::screen_params::ScreenParams;

/// CRT uniforms, laid out as `CrtScreen` in `tv_screen.wgsl`.
#[derive(Debug, Clone, Copy, Default, PartialEq, ShaderType, Reflect)]
pub struct CrtScreenUniform {
    pub time: f32,
    pub scan_count: f32,
    pub scan_intensity: f32,
    pub static_amount: f32,
    pub no_signal: f32,
    pub distortion: f32,
    pub flip_y: f32,
    pub power: f32,
}

impl From<&ScreenParams> for CrtScreenUniform {
    fn from(params: &ScreenParams) -> Self {
        Self {
            time: params.time,
            scan_count: params.scan_count,
            scan_intensity: params.scan_intensity,
            static_amount: params.static_amount,
            no_signal: params.no_signal,
            distortion: params.distortion,
            flip_y: params.flip_y,
            power: params.power,
        }
    }
}

/// CRT compositing on top of the standard PBR screen surface.
///
/// The shader replaces base colour and emissive with the composited
/// picture, scaled by the base material's colour and emissive terms.
#[derive(Asset, AsBindGroup, Reflect, Debug, Clone)]
pub struct CrtScreenExtension {
    #[uniform(100)]
    pub crt: CrtScreenUniform,

    #[texture(101)]
    #[sampler(102)]
    pub overlay: Handle<Image>,

    #[texture(103)]
    #[sampler(104)]
    pub video: Handle<Image>,
}

impl MaterialExtension for CrtScreenExtension {
    fn fragment_shader() -> ShaderRef {
        SCREEN_SHADER_PATH.into()
    }

    fn deferred_fragment_shader() -> ShaderRef {
        SCREEN_SHADER_PATH.into()
    }
}

pub type TvScreenMaterial = ExtendedMaterial<StandardMaterial, CrtScreenExtension>;

/// Handle of the single screen material instance.
#[derive(Resource, Clone)]
pub struct ScreenMaterial(pub Handle<TvScreenMaterial>);

pub fn create_screen_material(
    materials: &mut Assets<TvScreenMaterial>,
    video: Handle<Image>,
    overlay: Handle<Image>,
) -> Handle<TvScreenMaterial> {
    let mut material = TvScreenMaterial {
        base: StandardMaterial {
            perceptual_roughness: SCREEN_ROUGHNESS,
            metallic: 0.0,
            ..default()
        },
        extension: CrtScreenExtension {
            crt: CrtScreenUniform::default(),
            overlay,
            video,
        },
    };
    apply_screen_params(&mut material, &ScreenParams::default());
    materials.add(material)
}

pub fn apply_screen_params(material: &mut TvScreenMaterial, params: &ScreenParams) {
    material.extension.crt = CrtScreenUniform::from(params);
    let brightness = params.brightness;
    material.base.base_color = Color::linear_rgb(brightness, brightness, brightness);
    let glow = params.emissive_intensity;
    material.base.emissive = LinearRgba::rgb(glow, glow, glow);
}

pub fn sync_screen_material(
    tv: Res<Tv>,
    screen: Option<Res<ScreenMaterial>>,
    mut materials: ResMut<Assets<TvScreenMaterial>>,
) {
    let Some(screen) = screen else {
        return;
    };
    if let Some(material) = materials.get_mut(&screen.0) {
        apply_screen_params(material, tv.screen());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn params_flow_into_uniform_and_base_material() {
        let mut materials = Assets::<TvScreenMaterial>::default();
        let handle = create_screen_material(&mut materials, Handle::default(), Handle::default());

        let params = ScreenParams {
            power: 0.5,
            no_signal: 1.0,
            brightness: 0.35,
            emissive_intensity: 0.15,
            ..default()
        };
        let material = materials.get_mut(&handle).unwrap();
        apply_screen_params(material, &params);

        assert_relative_eq!(material.extension.crt.power, 0.5);
        assert_relative_eq!(material.extension.crt.no_signal, 1.0);
        assert_relative_eq!(material.base.base_color.to_linear().red, 0.35);
        assert_relative_eq!(material.base.emissive.green, 0.15);
        assert_relative_eq!(material.base.perceptual_roughness, SCREEN_ROUGHNESS);
    }

    #[test]
    fn a_fresh_material_is_dark() {
        let mut materials = Assets::<TvScreenMaterial>::default();
        let handle = create_screen_material(&mut materials, Handle::default(), Handle::default());
        let material = materials.get(&handle).unwrap();
        assert_eq!(material.extension.crt.power, 0.0);
        assert_eq!(material.base.emissive, LinearRgba::rgb(0.0, 0.0, 0.0));
    }
}
