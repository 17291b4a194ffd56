use crate::gui::app::AppMsg;
use arcslider::{FrameScheduler, FrameTime};
use gtk::prelude::*;
use gtk4 as gtk;
use std::time::Duration;

/// Frame ticks from the drawing area's frame clock, forwarded as
/// [`AppMsg::Frame`].
///
/// Holds the widget weakly; the widget's draw handler owns the slider that
/// owns this scheduler.
pub struct GtkFrameScheduler {
    widget: glib::WeakRef<gtk::DrawingArea>,
    sender: relm4::Sender<AppMsg>,
    tick: Option<gtk::TickCallbackId>,
}

impl GtkFrameScheduler {
    pub fn new(widget: &gtk::DrawingArea, sender: relm4::Sender<AppMsg>) -> Self {
        Self {
            widget: widget.downgrade(),
            sender,
            tick: None,
        }
    }
}

fn micros(us: i64) -> FrameTime {
    Duration::from_micros(us.max(0) as u64)
}

impl FrameScheduler for GtkFrameScheduler {
    // Same clock the frame clock stamps frames with.
    fn now(&self) -> FrameTime {
        micros(glib::monotonic_time())
    }

    fn register_frame_tick(&mut self) {
        if self.tick.is_some() {
            return;
        }
        let Some(widget) = self.widget.upgrade() else {
            log::debug!("Drawing area is gone, not scheduling frames");
            return;
        };

        let sender = self.sender.clone();
        self.tick = Some(widget.add_tick_callback(move |_, clock| {
            sender.emit(AppMsg::Frame(micros(clock.frame_time())));
            glib::ControlFlow::Continue
        }));
    }

    fn cancel_frame_tick(&mut self) {
        if let Some(tick) = self.tick.take() {
            tick.remove();
        }
    }
}
