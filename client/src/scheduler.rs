use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;

use inkpad_shared::{Painter, ReplayTicket};

use crate::canvas::CanvasSurface;

pub type SharedPainter = Rc<RefCell<Painter<CanvasSurface>>>;

/// Arms one browser timeout per ticket. Each timeout asks the painter to run
/// its ticket, which is dropped if a clear or newer replay happened first.
pub fn schedule_tickets(painter: &SharedPainter, tickets: Vec<ReplayTicket>) {
    if tickets.is_empty() {
        return;
    }
    log::debug!("scheduling {} replay draws", tickets.len());
    for ticket in tickets {
        let painter = painter.clone();
        Timeout::new(ticket.delay_ms, move || {
            let Ok(mut painter) = painter.try_borrow_mut() else {
                log::warn!("painter busy, replay draw skipped");
                return;
            };
            painter.run_ticket(&ticket);
        })
        .forget();
    }
}
