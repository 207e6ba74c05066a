use std::cell::Cell;
use std::rc::Rc;

use super::*;

fn counting_subscription() -> (Subscription, Rc<Cell<u32>>) {
    let cancelled = Rc::new(Cell::new(0));
    let counter = Rc::clone(&cancelled);
    let sub = Subscription::new(move || counter.set(counter.get() + 1));
    (sub, cancelled)
}

#[test]
fn drop_cancels_once() {
    let (sub, cancelled) = counting_subscription();
    assert_eq!(cancelled.get(), 0);
    drop(sub);
    assert_eq!(cancelled.get(), 1);
}

#[test]
fn unsubscribe_cancels() {
    let (sub, cancelled) = counting_subscription();
    sub.unsubscribe();
    assert_eq!(cancelled.get(), 1);
}

#[test]
fn replacing_a_held_subscription_cancels_the_old_one() {
    let (first, first_cancelled) = counting_subscription();
    let (second, second_cancelled) = counting_subscription();
    let mut slot = Some(first);
    drop(slot.replace(second));
    assert_eq!(first_cancelled.get(), 1);
    assert_eq!(second_cancelled.get(), 0);
    drop(slot);
    assert_eq!(second_cancelled.get(), 1);
}

#[test]
fn detached_subscription_is_inert() {
    let sub = Subscription::detached();
    assert_eq!(format!("{sub:?}"), "Subscription { active: false }");
    sub.unsubscribe();
}
