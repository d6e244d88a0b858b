use failure::Fail;
use futures::channel::mpsc;

/// A force/density kick at one grid cell. `x` and `y` are padded-grid
/// coordinates (interior is `1..=width`, `1..=height`); anything outside is
/// clamped onto the border when applied.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Impulse {
    pub x: i64,
    pub y: i64,
    pub force_x: f64,
    pub force_y: f64,
    pub density: f64,
}

impl Impulse {
    pub fn new(x: i64, y: i64, force_x: f64, force_y: f64, density: f64) -> Self {
        Impulse {
            x,
            y,
            force_x,
            force_y,
            density,
        }
    }
}

#[derive(Debug, Fail)]
#[fail(display = "impulse queue has been dropped")]
pub struct QueueClosed;

/// Producer half. Cheap to clone and safe to hand to other threads.
#[derive(Clone, Debug)]
pub struct ImpulseSender {
    tx: mpsc::UnboundedSender<Impulse>,
}

/// Consumer half, owned by whoever drives the simulation.
#[derive(Debug)]
pub struct ImpulseQueue {
    rx: mpsc::UnboundedReceiver<Impulse>,
}

pub fn impulse_channel() -> (ImpulseSender, ImpulseQueue) {
    let (tx, rx) = mpsc::unbounded();
    (ImpulseSender { tx }, ImpulseQueue { rx })
}

impl ImpulseSender {
    pub fn push(&self, impulse: Impulse) -> Result<(), QueueClosed> {
        self.tx.unbounded_send(impulse).map_err(|_| QueueClosed)
    }
}

impl ImpulseQueue {
    /// Takes everything queued since the previous call, in arrival order.
    /// Never blocks.
    pub fn drain(&mut self) -> Vec<Impulse> {
        let mut pending = Vec::new();
        // Err means empty, Ok(None) means every sender is gone.
        while let Ok(Some(impulse)) = self.rx.try_next() {
            pending.push(impulse);
        }
        pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_drain_returns_in_order_then_empty() {
        let (tx, mut queue) = impulse_channel();
        for k in 0..5 {
            tx.push(Impulse::new(k, 1, 0.0, 0.0, k as f64)).unwrap();
        }
        let drained = queue.drain();
        assert_eq!(drained.len(), 5);
        assert!(drained.iter().enumerate().all(|(k, imp)| imp.x == k as i64));
        assert!(queue.drain().is_empty());
    }

    #[test]
    fn test_drain_after_senders_dropped() {
        let (tx, mut queue) = impulse_channel();
        tx.push(Impulse::new(3, 3, 1.0, 0.0, 2.0)).unwrap();
        drop(tx);
        assert_eq!(queue.drain(), vec![Impulse::new(3, 3, 1.0, 0.0, 2.0)]);
        assert!(queue.drain().is_empty());
    }

    #[test]
    fn test_push_after_queue_dropped_fails() {
        let (tx, queue) = impulse_channel();
        drop(queue);
        assert!(tx.push(Impulse::new(1, 1, 0.0, 0.0, 1.0)).is_err());
    }

    #[test]
    fn test_producers_on_other_threads() {
        let (tx, mut queue) = impulse_channel();
        let handles: Vec<_> = (0..4)
            .map(|t| {
                let tx = tx.clone();
                thread::spawn(move || {
                    for k in 0..25 {
                        tx.push(Impulse::new(t, k, 0.0, 0.0, 1.0)).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        let drained = queue.drain();
        assert_eq!(drained.len(), 100);
        let total: f64 = drained.iter().map(|imp| imp.density).sum();
        assert_eq!(total, 100.0);
    }
}
