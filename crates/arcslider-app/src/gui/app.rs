use crate::config::{self, AppConfig};
use crate::events::AppEvent;
use crate::gui::painter;
use crate::gui::scheduler::GtkFrameScheduler;
use crate::gui::theme;
use arcslider::{FrameTime, Point, PointerEvent, Slider, SliderAction, SliderConfig, SliderMode};
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

pub struct AppInit {
    pub config: AppConfig,
    pub config_path: PathBuf,
    pub initial_value: Option<f64>,
    pub force_immediate: bool,
    pub rx: async_channel::Receiver<AppEvent>,
}

pub struct AppModel {
    pub slider: Rc<RefCell<Slider<GtkFrameScheduler>>>,
    pub value: f64,
    pub config_path: PathBuf,
    pub force_immediate: bool,
    pub drawing_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum AppMsg {
    Pointer(PointerEvent),
    Frame(FrameTime),
    ValueChanged(f64),
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

fn effective_slider_config(mut config: SliderConfig, force_immediate: bool) -> SliderConfig {
    if force_immediate {
        config.mode = SliderMode::Immediate;
    }
    config
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = AppInit;
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        gtk::ApplicationWindow {
            set_title: Some(&window_config.title),
            set_default_size: (window_config.width, window_config.height),
            add_css_class: "arcslider-window",

            gtk::Box {
                set_orientation: gtk::Orientation::Vertical,
                set_spacing: 12,
                set_halign: gtk::Align::Center,
                set_valign: gtk::Align::Center,

                #[local_ref]
                drawing_area -> gtk::DrawingArea {
                    set_content_width: window_config.slider_size,
                    set_content_height: window_config.slider_size,
                    add_css_class: "arcslider-area",

                    add_controller = gtk::GestureDrag {
                        connect_drag_begin[sender] => move |_, x, y| {
                            sender.input(AppMsg::Pointer(PointerEvent::Down(Point::new(x, y))));
                        },
                        connect_drag_update[sender] => move |gesture, dx, dy| {
                            if let Some((x, y)) = gesture.start_point() {
                                sender.input(AppMsg::Pointer(PointerEvent::Move(Point::new(
                                    x + dx,
                                    y + dy,
                                ))));
                            }
                        },
                        connect_drag_end[sender] => move |gesture, dx, dy| {
                            let (x, y) = gesture.start_point().unwrap_or_default();
                            sender.input(AppMsg::Pointer(PointerEvent::Up(Point::new(
                                x + dx,
                                y + dy,
                            ))));
                        },
                    },
                },

                gtk::Label {
                    add_css_class: "arcslider-value",
                    #[watch]
                    set_label: &format!("{:.0}%", model.value * 100.0),
                },
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let AppInit {
            config,
            config_path,
            initial_value,
            force_immediate,
            rx,
        } = init;
        let window_config = config.window;

        theme::load_css();

        let area = gtk::DrawingArea::new();
        let scheduler = GtkFrameScheduler::new(&area, sender.input_sender().clone());
        let mut slider = Slider::new(
            effective_slider_config(config.slider, force_immediate),
            scheduler,
        )
        .expect("slider config was validated while loading");

        let input = sender.input_sender().clone();
        slider.subscribe(move |value| input.emit(AppMsg::ValueChanged(value)));
        if let Some(value) = initial_value {
            slider.set_value(value);
        }

        let slider = Rc::new(RefCell::new(slider));

        let slider_draw = slider.clone();
        area.set_draw_func(move |_, cr, _, _| {
            if let Err(e) = painter::paint(cr, &slider_draw.borrow().render()) {
                log::error!("Drawing error: {}", e);
            }
        });

        let slider_resize = slider.clone();
        area.connect_resize(move |area, width, height| {
            let action = slider_resize
                .borrow_mut()
                .resize(width as f64, height as f64);
            if action.should_redraw {
                area.queue_draw();
            }
        });

        let model = AppModel {
            value: slider.borrow().value(),
            slider,
            config_path,
            force_immediate,
            drawing_area: area,
        };

        let drawing_area = &model.drawing_area;
        let widgets = view_output!();

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        let action = match msg {
            AppMsg::Pointer(event) => self.slider.borrow_mut().handle_pointer(event),
            AppMsg::Frame(now) => self.slider.borrow_mut().tick(now),
            AppMsg::ValueChanged(value) => {
                self.value = value;
                log::info!("Value changed: {:.4}", value);
                SliderAction::default()
            }
            AppMsg::ConfigReload => self.reload_config(),
        };

        if action.should_redraw {
            self.drawing_area.queue_draw();
        }
    }
}

impl AppModel {
    fn reload_config(&mut self) -> SliderAction {
        let new_config = match config::load_config(&self.config_path) {
            Ok(c) => c,
            Err(e) => {
                log::error!("Failed to reload config: {}", e);
                return SliderAction::default();
            }
        };

        let slider_config = effective_slider_config(new_config.slider, self.force_immediate);
        match self.slider.borrow_mut().set_config(slider_config) {
            Ok(action) => {
                log::info!("Configuration reloaded");
                action
            }
            Err(e) => {
                log::error!("Rejected reloaded slider config: {}", e);
                SliderAction::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_force_immediate_overrides_mode() {
        let animated = SliderConfig::default();
        assert_eq!(
            effective_slider_config(animated.clone(), true).mode,
            SliderMode::Immediate
        );
        assert_eq!(
            effective_slider_config(animated, false).mode,
            SliderMode::Animated
        );
    }

    #[test]
    fn test_events_map_to_messages() {
        assert!(matches!(
            AppMsg::from(AppEvent::ConfigReload),
            AppMsg::ConfigReload
        ));
    }
}
