//! Incremental collection over the allocation queue.
//!
//! There is no root set. Each step looks at the head of the queue: a value
//! that is still held goes to the back, an unheld one is freed. Freeing an
//! Array releases its elements, which are then freed in turn when they come
//! round. Cycles keep each other's counts above zero forever.

use super::Heap;
use crate::ValueData;

impl Heap {
    /// Examine the head of the queue. Returns `true` if it was freed.
    pub fn sweep_one(&mut self) -> bool {
        let Some(id) = self.queue.pop_front() else {
            return false;
        };

        let Some(slot) = self.slots.get_mut(id.index()) else {
            return false;
        };

        match &slot.cell {
            Some(cell) if cell.refs > 0 => {
                self.queue.push_back(id);
                return false;
            }
            Some(_) => {}
            None => return false,
        }

        let data = slot.cell.take().map(|cell| cell.data);
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(u32::try_from(id.index()).unwrap_or(u32::MAX));

        if let Some(ValueData::Array(elements)) = data {
            for element in elements {
                self.release(element);
            }
        }
        true
    }

    /// Run the collector.
    ///
    /// A full sweep visits every queued value once. Otherwise the budget is
    /// the growth in queued values since the previous call plus two, so the
    /// collector keeps pace with allocation without ever walking the whole
    /// queue. Returns the number of values freed.
    pub fn sweep(&mut self, full: bool) -> usize {
        if self.queue.is_empty() {
            return 0;
        }

        let account = self.queue.len();
        let budget = if full {
            account
        } else {
            (account + 2).saturating_sub(self.last_account)
        };

        let mut freed = 0;
        for _ in 0..budget {
            if self.queue.is_empty() {
                break;
            }
            if self.sweep_one() {
                freed += 1;
            }
        }

        self.last_account = self.queue.len();

        if full {
            tracing::debug!(freed, live = self.last_account, "full sweep");
        } else if freed > 0 {
            tracing::trace!(freed, budget, "incremental sweep");
        }
        freed
    }
}
