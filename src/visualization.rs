//! Interactive 3D viewer using kiss3d.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use kiss3d::prelude::*;
use log::{debug, info, warn};

use cubeplay::config::Config;
use cubeplay::controls::{command_for, Command, KeyInput};
use cubeplay::cubelet::{Coord, Slot};
use cubeplay::geometry::{rotate, Matrix, IDENTITY};
use cubeplay::engine::{Activity, Engine};
use cubeplay::orbit::Orbit;
use cubeplay::persistence;
use cubeplay::scramble::scramble;
use cubeplay::timer::{format_time, Timer};
use cubeplay::{Frame, RenderSurface};

/// Size of a cubelet body (slightly smaller than 1.0 for visible gaps).
const BODY_SIZE: f32 = 0.94;
const STICKER_SIZE: f32 = 0.8;
const STICKER_THICKNESS: f32 = 0.04;
/// How far the turning layer is lifted out at the middle of its tween.
const LIFT_HEIGHT: f32 = 0.3;
const CAMERA_DISTANCE: f32 = 9.0;

/// Puzzle coordinates have `y = -1` on the top layer; the world has Y up.
fn world_vector((x, y, z): Coord) -> Vec3 {
    Vec3::new(x as f32, -y as f32, z as f32)
}

/// A body or sticker node, tied to the cubelet it belongs to.
struct RenderedNode {
    node: SceneNode3d,
    base_position: Vec3,
    cubelet_index: usize,
}

/// kiss3d scene that mirrors the engine's cubelets.
struct SceneSurface {
    scene: SceneNode3d,
    nodes: Vec<RenderedNode>,
    /// Revision, reveal flag and orientation the current nodes were built for.
    built_for: Option<(u64, bool, Matrix)>,
    reveal: bool,
    /// Whole-cube orientation, copied from the orbit each frame.
    orientation: Matrix,
}

impl SceneSurface {
    fn new() -> Self {
        let mut scene = SceneNode3d::empty();
        scene
            .add_light(Light::point(100.0))
            .set_position(Vec3::new(5.0, 6.0, 7.0));
        Self {
            scene,
            nodes: Vec::new(),
            built_for: None,
            reveal: false,
            orientation: IDENTITY,
        }
    }

    fn rebuild(&mut self, frame: &Frame<'_>) {
        for mut rendered in self.nodes.drain(..) {
            rendered.node.remove();
        }

        for (cubelet_index, cubelet) in frame.cubelets.iter().enumerate() {
            let coord = if self.reveal {
                cubelet.home
            } else {
                cubelet.position
            };
            let center = world_vector(rotate(&self.orientation, coord));

            let body = self
                .scene
                .add_cube(BODY_SIZE, BODY_SIZE, BODY_SIZE)
                .set_color(Color::new(0.08, 0.08, 0.1, 1.0))
                .set_position(center);
            self.nodes.push(RenderedNode {
                node: body,
                base_position: center,
                cubelet_index,
            });

            for slot in Slot::ALL {
                let Some(color) = cubelet.color(slot) else {
                    continue;
                };
                let normal = world_vector(rotate(&self.orientation, slot.normal()));
                let (w, h, d) = if normal.x != 0.0 {
                    (STICKER_THICKNESS, STICKER_SIZE, STICKER_SIZE)
                } else if normal.y != 0.0 {
                    (STICKER_SIZE, STICKER_THICKNESS, STICKER_SIZE)
                } else {
                    (STICKER_SIZE, STICKER_SIZE, STICKER_THICKNESS)
                };
                let [r, g, b] = color.rgb();
                let position = center + normal * (BODY_SIZE + STICKER_THICKNESS) * 0.5;
                let sticker = self
                    .scene
                    .add_cube(w, h, d)
                    .set_color(Color::new(r, g, b, 1.0))
                    .set_position(position);
                self.nodes.push(RenderedNode {
                    node: sticker,
                    base_position: position,
                    cubelet_index,
                });
            }
        }
        self.built_for = Some((frame.revision, self.reveal, self.orientation));
    }
}

impl RenderSurface for SceneSurface {
    fn draw(&mut self, frame: &Frame<'_>) {
        if self.built_for != Some((frame.revision, self.reveal, self.orientation)) {
            self.rebuild(frame);
        }

        // lift the turning layer out and back during the tween
        let lift = frame
            .animation
            .filter(|_| !self.reveal)
            .map(|animation| {
                let amount = (animation.progress * std::f32::consts::PI).sin() * LIFT_HEIGHT;
                (animation.mv.face, amount)
            });
        for rendered in &mut self.nodes {
            let offset = match lift {
                Some((face, amount))
                    if face.contains(frame.cubelets[rendered.cubelet_index].position) =>
                {
                    world_vector(rotate(&self.orientation, face.normal())) * amount
                }
                _ => Vec3::ZERO,
            };
            rendered.node.set_position(rendered.base_position + offset);
        }
    }
}

/// Everything the frame loop mutates in response to input.
struct Viewer {
    engine: Engine,
    orbit: Orbit,
    surface: SceneSurface,
    scramble_length: usize,
    best_time_path: Option<PathBuf>,
    saved_best: Option<Duration>,
}

impl Viewer {
    fn new(config: &Config) -> Self {
        let best_time_path = config.storage.resolved_best_time_path();
        let saved_best = best_time_path
            .as_deref()
            .and_then(persistence::load_best_time);
        if let Some(best) = saved_best {
            info!("Loaded best time {}", format_time(best));
        }

        Self {
            engine: Engine::with_timer(config.engine.settings(), Timer::with_best(saved_best)),
            orbit: config.view.orbit(),
            surface: SceneSurface::new(),
            scramble_length: config.engine.scramble_length,
            best_time_path,
            saved_best,
        }
    }

    fn handle(&mut self, command: Command) {
        let result = match command {
            Command::Turn(mv) => self.engine.turn(mv),
            Command::ToggleTimer => self.engine.toggle_timer().map(|_| ()),
            Command::Shuffle => {
                let moves = scramble(&mut rand::rng(), self.scramble_length);
                self.engine.shuffle(moves)
            }
            Command::Solve => self.engine.solve(),
            Command::Reset => {
                self.engine.reset();
                self.orbit.reset();
                Ok(())
            }
            Command::ToggleReveal => {
                self.surface.reveal = !self.surface.reveal;
                Ok(())
            }
            Command::RotateCube(axis) => {
                self.orbit.rotate_cube(axis);
                Ok(())
            }
        };
        if let Err(e) = result {
            debug!("Ignored {command:?}: {e}");
        }
    }

    /// Writes the best time whenever the engine's record improves.
    fn persist_best(&mut self) {
        let best = self.engine.timer().best();
        if best == self.saved_best {
            return;
        }
        self.saved_best = best;
        let (Some(path), Some(best)) = (&self.best_time_path, best) else {
            return;
        };
        info!("New best time {}", format_time(best));
        if let Err(e) = persistence::save_best_time(path, best) {
            warn!("Failed to save best time to {}: {e}", path.display());
        }
    }

    fn title(&self) -> String {
        let timer = self.engine.timer();
        let best = timer
            .best()
            .map(format_time)
            .unwrap_or_else(|| "--:--.--".to_string());
        let status = match self.engine.activity() {
            Some(Activity::Scrambling) => " - scrambling",
            Some(Activity::Solving) => " - solving",
            None if self.engine.cube().is_solved() => " - solved",
            None => "",
        };
        format!(
            "Cube {} (best {}), {} moves{}",
            format_time(timer.elapsed()),
            best,
            self.engine.history().len(),
            status
        )
    }
}

fn key_input(key: kiss3d::event::Key) -> Option<KeyInput> {
    use kiss3d::event::Key;
    let letter = match key {
        Key::Space => return Some(KeyInput::Space),
        Key::U => 'U',
        Key::D => 'D',
        Key::F => 'F',
        Key::B => 'B',
        Key::L => 'L',
        Key::R => 'R',
        Key::N => 'N',
        Key::S => 'S',
        Key::C => 'C',
        Key::V => 'V',
        Key::X => 'X',
        Key::Y => 'Y',
        Key::Z => 'Z',
        _ => return None,
    };
    Some(KeyInput::Letter(letter))
}

/// Opens the viewer and runs until the window is closed.
pub fn display(config: &Config) {
    pollster::block_on(display_async(config));
}

async fn display_async(config: &Config) {
    let mut viewer = Viewer::new(config);

    let mut title = viewer.title();
    let mut window = Window::new(&title).await;

    let mut camera = OrbitCamera3d::default();
    camera.set_dist(CAMERA_DISTANCE);

    let mut cursor = (0.0f32, 0.0f32);
    let mut last_frame = Instant::now();
    loop {
        for event in window.events().iter() {
            use kiss3d::event::{Action, Modifiers, MouseButton, WindowEvent};
            match event.value {
                WindowEvent::Key(key, Action::Press, modifiers) => {
                    let shift = modifiers.contains(Modifiers::Shift);
                    if let Some(command) = key_input(key).and_then(|k| command_for(k, shift)) {
                        viewer.handle(command);
                    }
                }
                WindowEvent::MouseButton(MouseButton::Button1, Action::Press, _) => {
                    viewer.orbit.begin_drag(cursor.0, cursor.1);
                }
                WindowEvent::MouseButton(MouseButton::Button1, Action::Release, _) => {
                    viewer.orbit.end_drag();
                }
                WindowEvent::CursorPos(x, y, _) => {
                    cursor = (x as f32, y as f32);
                    viewer.orbit.drag_to(cursor.0, cursor.1);
                }
                _ => {}
            }
        }

        let now = Instant::now();
        viewer.engine.advance(now - last_frame);
        last_frame = now;
        viewer.persist_best();

        let angles = viewer.orbit.angles();
        camera.set_yaw(std::f32::consts::FRAC_PI_2 - angles.yaw.to_radians());
        camera.set_pitch(std::f32::consts::FRAC_PI_2 - angles.elevation.to_radians());

        viewer.surface.orientation = *viewer.orbit.orientation();
        viewer.engine.present(&mut viewer.surface);

        let next_title = viewer.title();
        if next_title != title {
            window.set_title(&next_title);
            title = next_title;
        }

        if !window.render_3d(&mut viewer.surface.scene, &mut camera).await {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cubeplay::cubelet::Face;

    #[test]
    fn test_top_layer_points_up_in_world() {
        assert_eq!(world_vector(Face::U.normal()), Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(world_vector(Face::D.normal()), Vec3::new(0.0, -1.0, 0.0));
        assert_eq!(world_vector(Face::F.normal()), Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_orientation_rotates_drawn_positions() {
        let mut orbit = Orbit::default();
        orbit.rotate_cube(cubeplay::orbit::ViewAxis::X);
        // the front centre is drawn on top after x
        let drawn = world_vector(rotate(orbit.orientation(), Face::F.normal()));
        assert_eq!(drawn, Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_key_mapping() {
        use kiss3d::event::Key;
        assert_eq!(key_input(Key::Space), Some(KeyInput::Space));
        assert_eq!(key_input(Key::R), Some(KeyInput::Letter('R')));
        assert_eq!(key_input(Key::Z), Some(KeyInput::Letter('Z')));
        assert_eq!(key_input(Key::Up), None);
    }
}
