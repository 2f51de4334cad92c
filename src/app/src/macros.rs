/// Macro for model field updates with automatic rendering.
/// Supports both single and multiple field updates.
///
/// Renders only when at least one field actually changed.
///
/// # Examples
///
/// Single field update:
/// ```ignore
/// update_field!(model.message, None)
/// ```
///
/// Multiple field updates:
/// ```ignore
/// update_field!(
///     model.submit_state, SubmitState::Idle;
///     model.message, None
/// )
/// ```
#[macro_export]
macro_rules! update_field {
    // Multiple field updates (must come first to match the pattern)
    ($($model_field:expr, $value:expr);+ $(;)?) => {{
        let mut changed = false;
        $(
            let value = $value;
            if $model_field != value {
                $model_field = value;
                changed = true;
            }
        )+
        if changed {
            crux_core::render::render()
        } else {
            crux_core::Command::done()
        }
    }};

    // Single field update
    ($model_field:expr, $value:expr) => {{
        update_field!($model_field, $value;)
    }};
}

/// Macro for waiting on a shell delay, then sending an event.
///
/// # Example
/// ```ignore
/// after_delay!(2000, Event::Form(FormEvent::RedirectDue))
/// ```
#[macro_export]
macro_rules! after_delay {
    ($millis:expr, $event:expr) => {
        $crate::DelayCmd::millis($millis)
            .build()
            .then_send(move |_elapsed| $event)
    };
}
