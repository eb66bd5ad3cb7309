use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Instant;

use eframe::glow;
use egui::{Context, FontId, Id, LayerId, Order, Painter, Vec2};

use breakout::breakout::app_game_drawer::{AppGameDrawer, FOREGROUND_COLOR};
use breakout::breakout::high_score::{HighScoreFile, HIGH_SCORE_FILE};
use breakout::breakout::mechanics::*;
use breakout::util::init_logging;

const WINDOW_TITLE: &str = "Breakout Game";

pub const FRAME_SIZE_X: f32 = MODEL_GRID_LEN_X as f32;
pub const FRAME_SIZE_Y: f32 = MODEL_GRID_LEN_Y as f32;

pub struct BreakoutApp {
    mechanics: BreakoutMechanics,
    step_clock: StepClock,
    /// read by `main` to persist the high score after the window is gone
    high_score: Arc<AtomicU32>,
}

impl BreakoutApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        high_score: Arc<AtomicU32>,
    ) -> Self {
        let now = Instant::now();
        Self {
            mechanics: BreakoutMechanics::new(high_score.load(Ordering::Relaxed), now),
            step_clock: StepClock::new(now),
            high_score,
        }
    }

    fn read_ui_control(
        &self,
        ctx: &Context,
    ) -> GameInput {
        ctx.input(|i| GameInput {
            left: i.key_down(egui::Key::ArrowLeft),
            right: i.key_down(egui::Key::ArrowRight),
        })
    }

    fn proceed(
        &mut self,
        input: GameInput,
        now: Instant,
    ) {
        if self.step_clock.tick(now) {
            self.mechanics.time_step(input, now);
            self.publish_high_score();
        }
    }

    fn publish_high_score(&self) {
        self.high_score.store(self.mechanics.high_score, Ordering::Relaxed);
    }

    fn draw_game_content(
        &self,
        painter: &Painter,
        now: Instant,
    ) {
        let paint_offset = painter.clip_rect().min.to_vec2();
        let canvas_size = painter.clip_rect().size();

        let drawer = AppGameDrawer::new(canvas_size, &self.mechanics, now);
        for mut shape in drawer.shapes() {
            shape.translate(paint_offset);
            painter.add(shape);
        }
        let font_id = FontId::proportional(drawer.font_size());
        for overlay in drawer.texts() {
            painter.text(
                overlay.pos + paint_offset,
                overlay.anchor,
                overlay.text,
                font_id.clone(),
                FOREGROUND_COLOR,
            );
        }
    }
}

impl eframe::App for BreakoutApp {
    fn update(
        &mut self,
        ctx: &Context,
        frame: &mut eframe::Frame,
    ) {
        // Escape quits like closing the window
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            frame.close();
        }

        let input = self.read_ui_control(ctx);
        let now = Instant::now();
        self.proceed(input, now);

        let game_painter = ctx.layer_painter(LayerId::new(Order::Foreground, Id::new("game")));
        self.draw_game_content(&game_painter, now);

        ctx.request_repaint_after(self.step_clock.next_step_time().saturating_duration_since(Instant::now()));
    }

    fn on_exit(
        &mut self,
        _: Option<&glow::Context>,
    ) {
        self.publish_high_score();
        log::debug!("window closed");
    }
}

fn breakout_user_game(high_score: Arc<AtomicU32>) -> eframe::Result<()> {
    let mut native_options = eframe::NativeOptions::default();
    native_options.default_theme = eframe::Theme::Dark;
    native_options.initial_window_size = Some(Vec2::new(FRAME_SIZE_X, FRAME_SIZE_Y));
    eframe::run_native(WINDOW_TITLE, native_options, Box::new(move |cc| {
        Box::new(BreakoutApp::new(cc, high_score))
    }))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let store = HighScoreFile::new(HIGH_SCORE_FILE);
    let high_score = Arc::new(AtomicU32::new(store.load()?));

    breakout_user_game(Arc::clone(&high_score))?;

    let high_score = high_score.load(Ordering::Relaxed);
    store.save(high_score)?;
    log::info!("high score {high_score} saved to {}", store.path().display());
    Ok(())
}
