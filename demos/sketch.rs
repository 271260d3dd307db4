//! Headless sketch demo: draws strokes with simulated pointer input,
//! copies and pastes the canvas, and plays the captured frames back.
//!
//! Run: cargo run --bin sketch

use voxsketch_core::{Color, GridError, Point, TileGrid};
use voxsketch_edit::{
    ActionBinding, ActionRegistry, History, Playback, PlaybackConfig, PointerEvent, Sketch,
};
use voxsketch_raster::RasterPoint;

const ROWS: usize = 12;
const COLS: usize = 8;
const INK: &str = "#3080ff";

type Canvas = TileGrid<Option<Color>>;

fn blank() -> Result<Canvas, GridError> {
    TileGrid::new(ROWS, COLS, 1.0, 1.0, |_| None)
}

fn ink(tile: &mut Option<Color>, p: &RasterPoint) {
    *tile = Some(p.color);
}

/// Render with rows running left to right and columns top to bottom.
fn render(canvas: &Canvas) -> String {
    let mut out = String::new();
    for col in 0..canvas.cols() {
        for row in 0..canvas.rows() {
            let ch = match canvas.tile(row, col) {
                Ok(Some(_)) => '#',
                Ok(None) => '.',
                Err(_) => '?',
            };
            out.push(ch);
        }
        out.push('\n');
    }
    out
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let color: Color = INK.parse()?;
    let mut sketch = Sketch::new(blank()?).with_color(color);

    // A drag from one corner towards the other, then a second short stroke.
    let gestures = [
        PointerEvent::press(Point::new(0, 0)),
        PointerEvent::moved(Point::new(5, 3)),
        PointerEvent::moved(Point::new(11, 7)),
        PointerEvent::release(Point::new(11, 7)),
        PointerEvent::moved(Point::new(0, 7)),
        PointerEvent::press(Point::new(0, 7)),
        PointerEvent::moved(Point::new(6, 7)),
        PointerEvent::leave(Point::new(6, 7)),
    ];
    let mut frames = Vec::new();
    for ev in gestures {
        if let Some(stroke) = sketch.handle_pointer(ev, ink) {
            println!("{:?} at {}: {stroke:?}", ev.action, ev.pos);
            frames.push(sketch.grid().tiles().to_vec());
        }
    }
    println!("{}", render(sketch.grid()));

    // Copy the canvas, wipe it, and paste it back.
    let mut history = History::new();
    history.copy_cloned(sketch.grid().tiles().to_vec());
    sketch.grid_mut().tiles_mut().fill(None);
    if let Some(tiles) = history.paste() {
        sketch.grid_mut().tiles_mut().clone_from_slice(&tiles);
    }
    println!("after paste, {} tiles inked", sketch.grid().tiles().iter().flatten().count());

    // Replay captured frames at 4 fps with a 60 Hz host loop.
    let mut playback = Playback::new(PlaybackConfig { frame_rate: 4.0 }, || vec![None; ROWS * COLS])?;
    playback.set_len(frames.len());
    for (i, frame) in frames.into_iter().enumerate() {
        playback.set_frame(i, frame)?;
    }

    let mut actions = ActionRegistry::new();
    actions.register("play", ActionBinding::new("#play", "click"));
    actions.on("play", |fps: &f64| println!("play requested at {fps} fps"));
    actions.trigger("play", &playback.frame_rate());

    playback.play();
    for tick in 0..60 {
        if playback.update(1000.0 / 60.0) > 0 {
            let inked = playback.current_frame()?.iter().flatten().count();
            println!("tick {tick:2}: frame {} ({inked} tiles)", playback.current_index());
        }
    }
    playback.stop();
    Ok(())
}
