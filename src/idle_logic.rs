/// Decide whether the host loop should dismiss the menu after a period
/// of inactivity.
pub fn menu_should_dismiss(menu_active: bool, idle_ticks: u32, timeout_ticks: u32) -> bool {
    menu_active && idle_ticks >= timeout_ticks
}
