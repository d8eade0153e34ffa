// scene lighting: a shadow casting sun plus ambient light
// static mode holds a fixed sun, daylight mode moves it across the sky every frame

use bevy::prelude::*;

use crate::config::*;

#[derive(Resource, Default, Clone, Copy, PartialEq, Eq, Debug)]
pub enum LightMode {
    #[default]
    Static,
    Daylight,
}

impl LightMode {
    pub fn toggled(self) -> Self {
        match self {
            LightMode::Static => LightMode::Daylight,
            LightMode::Daylight => LightMode::Static,
        }
    }
}

// fraction of the day, wraps at 1
#[derive(Resource, Default, Debug)]
pub struct DayCycle {
    pub day_time: f32,
}

// setting these parameters as a resource allows for runtime modifications
#[derive(Resource, Clone, Debug)]
pub struct LightSettings {
    pub day_step: f32,
    pub lux_per_intensity: f32,
    pub ambient_per_intensity: f32,
}

impl Default for LightSettings {
    fn default() -> Self {
        Self {
            day_step: DAY_STEP,
            lux_per_intensity: LUX_PER_INTENSITY,
            ambient_per_intensity: AMBIENT_BRIGHTNESS_PER_INTENSITY,
        }
    }
}

#[derive(Component)]
pub struct Sun;

/// Where the sun is and how bright things are, in scene units
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SunState {
    pub position: Vec3,
    pub intensity: f32,
    pub ambient: f32,
    pub color: Color,
}

pub fn static_sun() -> SunState {
    SunState {
        position: Vec3::from_array(STATIC_SUN_POSITION),
        intensity: STATIC_SUN_INTENSITY,
        ambient: STATIC_AMBIENT_INTENSITY,
        // warm white
        color: Color::hsl(36.0, 1.0, 0.95),
    }
}

pub fn daylight_sun(day_time: f32) -> SunState {
    let angle = MIN_SUN_ANGLE + day_time * (MAX_SUN_ANGLE - MIN_SUN_ANGLE);
    let (sin, cos) = angle.sin_cos();

    SunState {
        position: Vec3::new(sin * SUN_ORBIT_RADIUS, cos * SUN_ORBIT_HEIGHT, cos * SUN_ORBIT_RADIUS),
        intensity: 1.0 + 0.5 * sin,
        ambient: 0.2 + 0.8 * sin.max(0.0),
        color: Color::hsl(day_time * 360.0, 1.0, 0.7),
    }
}

pub fn advance_day(day_time: f32, step: f32) -> f32 {
    let next = day_time + step;
    if next >= 1.0 { next - 1.0 } else { next }
}

pub struct LightingPlugin;

impl Plugin for LightingPlugin {
    fn build(&self, app: &mut App) {
        app
            .insert_resource(LightMode::default())
            .insert_resource(DayCycle::default())
            .insert_resource(LightSettings::default())
            .add_systems(Startup, spawn_sun)
            .add_systems(Update, (
                apply_static_light.run_if(resource_changed::<LightMode>.and(resource_equals(LightMode::Static))),
                advance_daylight.run_if(resource_equals(LightMode::Daylight)),
            ));
    }
}

fn spawn_sun(mut commands: Commands, settings: Res<LightSettings>) {
    let sun = static_sun();
    commands.spawn((
        Sun,
        DirectionalLight {
            color: sun.color,
            illuminance: sun.intensity * settings.lux_per_intensity,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_translation(sun.position).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

fn apply_sun(
    state: SunState,
    settings: &LightSettings,
    light: &mut DirectionalLight,
    transform: &mut Transform,
    ambient: &mut AmbientLight,
) {
    light.illuminance = state.intensity * settings.lux_per_intensity;
    light.color = state.color;
    *transform = Transform::from_translation(state.position).looking_at(Vec3::ZERO, Vec3::Y);
    ambient.brightness = state.ambient * settings.ambient_per_intensity;
}

// only runs on the switch back, the static sun never moves on its own
fn apply_static_light(
    settings: Res<LightSettings>,
    mut ambient: ResMut<AmbientLight>,
    mut suns: Query<(&mut DirectionalLight, &mut Transform), With<Sun>>,
) {
    for (mut light, mut transform) in suns.iter_mut() {
        apply_sun(static_sun(), &settings, &mut light, &mut transform, &mut ambient);
    }
    info!("Lighting: static");
}

fn advance_daylight(
    settings: Res<LightSettings>,
    mut cycle: ResMut<DayCycle>,
    mut ambient: ResMut<AmbientLight>,
    mut suns: Query<(&mut DirectionalLight, &mut Transform), With<Sun>>,
) {
    cycle.day_time = advance_day(cycle.day_time, settings.day_step);
    let state = daylight_sun(cycle.day_time);
    for (mut light, mut transform) in suns.iter_mut() {
        apply_sun(state, &settings, &mut light, &mut transform, &mut ambient);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_wraps_at_one() {
        assert_eq!(advance_day(0.25, 0.25), 0.5);
        assert!((advance_day(0.9995, 0.001) - 0.0005).abs() < 1e-5);
        assert!(advance_day(0.999, 0.001) < 1e-5);
    }

    #[test]
    fn noon_is_brightest() {
        let noon = daylight_sun(0.5);
        assert!((noon.intensity - 1.5).abs() < 1e-5);
        assert!((noon.ambient - 1.0).abs() < 1e-5);
        assert!((noon.position.x - SUN_ORBIT_RADIUS).abs() < 1e-2);

        let dawn = daylight_sun(0.0);
        assert!(dawn.intensity < noon.intensity);
        assert!(dawn.ambient < noon.ambient);
        assert!(dawn.ambient >= 0.2);
    }

    #[test]
    fn sun_hue_follows_the_day() {
        let Color::Hsla(hsla) = daylight_sun(0.25).color else {
            panic!("expected an hsl color");
        };
        assert!((hsla.hue - 90.0).abs() < 1e-3);
        assert_eq!((hsla.saturation, hsla.lightness), (1.0, 0.7));
    }

    #[test]
    fn static_sun_is_fixed() {
        let sun = static_sun();
        assert_eq!(sun.position, Vec3::new(50.0, 70.0, 70.0));
        assert_eq!(sun.intensity, STATIC_SUN_INTENSITY);
        assert_eq!(sun.color, Color::hsl(36.0, 1.0, 0.95));
        assert_eq!(sun, static_sun());
    }

    fn lit_app() -> App {
        let mut app = App::new();
        app.insert_resource(AmbientLight::default())
            .add_plugins(LightingPlugin);
        app.update();
        app
    }

    fn sun(app: &mut App) -> (Transform, Color) {
        let world = app.world_mut();
        let (light, transform) = world.query_filtered::<(&DirectionalLight, &Transform), With<Sun>>().single(world).unwrap();
        (*transform, light.color)
    }

    fn set_sun_transform(app: &mut App, transform: Transform) {
        let world = app.world_mut();
        let mut sun = world.query_filtered::<&mut Transform, With<Sun>>().single_mut(world).unwrap();
        *sun = transform;
    }

    fn set_mode(app: &mut App, mode: LightMode) {
        *app.world_mut().resource_mut::<LightMode>() = mode;
    }

    fn day_time(app: &App) -> f32 {
        app.world().resource::<DayCycle>().day_time
    }

    #[test]
    fn static_mode_leaves_the_sun_alone() {
        let mut app = lit_app();
        let static_pose = Transform::from_translation(static_sun().position).looking_at(Vec3::ZERO, Vec3::Y);
        assert_eq!(sun(&mut app), (static_pose, static_sun().color));

        let moved = Transform::from_xyz(1.0, 2.0, 3.0);
        set_sun_transform(&mut app, moved);
        app.update();
        app.update();
        assert_eq!(sun(&mut app).0, moved);
        assert_eq!(day_time(&app), 0.0);
    }

    #[test]
    fn switching_back_to_static_restores_the_sun() {
        let mut app = lit_app();
        let static_pose = Transform::from_translation(static_sun().position).looking_at(Vec3::ZERO, Vec3::Y);

        set_mode(&mut app, LightMode::Daylight);
        app.update();
        let after_one = day_time(&app);
        assert!(after_one > 0.0);
        assert_ne!(sun(&mut app).0, static_pose);
        app.update();
        assert!(day_time(&app) > after_one);

        set_mode(&mut app, LightMode::Static);
        app.update();
        assert_eq!(sun(&mut app), (static_pose, static_sun().color));
        let ambient = app.world().resource::<AmbientLight>().brightness;
        assert_eq!(ambient, STATIC_AMBIENT_INTENSITY * AMBIENT_BRIGHTNESS_PER_INTENSITY);

        // the day is paused, not reset
        let paused = day_time(&app);
        app.update();
        app.update();
        assert_eq!(day_time(&app), paused);
        assert!(paused > 0.0);
    }

    #[test]
    fn mode_toggles() {
        assert_eq!(LightMode::default(), LightMode::Static);
        assert_eq!(LightMode::Static.toggled(), LightMode::Daylight);
        assert_eq!(LightMode::Daylight.toggled().toggled(), LightMode::Daylight);
    }
}
