use std::fs;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use euler_fluid::{impulse_channel, render, Config, DragTracker, FixedStep, FramePacer, GridConfig, ImpulseSender, Simulation};
use log::{debug, info, warn};

const SAMPLE_INTERVAL: Duration = Duration::from_millis(8);
/// Radians per second of the virtual pointer.
const ANGULAR_SPEED: f64 = 1.5;
/// Every n-th pointer sample holds still instead of moving.
const HOLD_EVERY: u64 = 4;

fn main() -> Result<(), failure::Error> {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => Config::load(&path)?,
        None => Config::default(),
    };
    let mut sim = Simulation::new(&config)?;
    info!(
        "{}x{} grid, dt {:.4}s, {} iterations, overrelaxation {}",
        config.grid.width,
        config.grid.height,
        sim.dt(),
        config.solver.iterations,
        config.solver.overrelaxation
    );

    let out_dir = &config.output.directory;
    fs::create_dir_all(out_dir)?;
    info!("writing every {} of {} frames to {}", config.output.every, config.output.frames, out_dir.display());

    let (sender, mut queue) = impulse_channel();
    let running = Arc::new(AtomicBool::new(true));
    let stirrer = {
        let running = Arc::clone(&running);
        let grid = config.grid;
        thread::spawn(move || stir(sender, grid, running))
    };

    let mut clock = FixedStep::from_timing(&config.timing);
    let mut pacer = FramePacer::from_timing(&config.timing);
    for frame in 0..config.output.frames {
        let due = clock.advance(pacer.begin());
        for _ in 0..due {
            let impulses = queue.drain();
            sim.step(&impulses);
        }

        let snapshot = sim.snapshot();
        debug!("frame {}: {} steps, total density {:.3}", frame, due, snapshot.total_density());
        if frame % config.output.every == 0 {
            let path = render::save_frame(&snapshot, config.grid.cell_length, out_dir, frame)?;
            info!(
                "{}: total density {:.3}, max speed {:.4}",
                path.display(),
                snapshot.total_density(),
                snapshot.max_speed()
            );
        }

        pacer.finish();
    }

    running.store(false, Ordering::Relaxed);
    if stirrer.join().is_err() {
        warn!("stirrer thread panicked");
    }
    Ok(())
}

/// Drags a virtual pointer in a circle around the middle of the display,
/// pausing now and then so it also pours in density.
fn stir(sender: ImpulseSender, grid: GridConfig, running: Arc<AtomicBool>) {
    let cell = f64::from(grid.cell_length);
    let cx = grid.width as f64 * cell / 2.0;
    let cy = grid.height as f64 * cell / 2.0;
    let radius = 0.3 * cx.min(cy);
    let point = |angle: f64| ((cx + radius * angle.cos()) as i64, (cy + radius * angle.sin()) as i64);

    let start = Instant::now();
    let mut tracker = DragTracker::new(grid.cell_length);
    let (px, py) = point(0.0);
    tracker.press(px, py, start);

    let mut sample = 0u64;
    while running.load(Ordering::Relaxed) {
        thread::sleep(SAMPLE_INTERVAL);
        sample += 1;

        let now = Instant::now();
        let impulse = if sample % HOLD_EVERY == 0 {
            tracker.hold(now)
        } else {
            let (px, py) = point(ANGULAR_SPEED * now.duration_since(start).as_secs_f64());
            Some(tracker.drag(px, py, now))
        };

        if let Some(impulse) = impulse {
            if sender.push(impulse).is_err() {
                debug!("impulse queue closed, stirrer stopping");
                break;
            }
        }
    }
    tracker.release();
}
