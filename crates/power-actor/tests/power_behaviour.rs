//! Behaviour of the power actor against in-memory collaborators.

#![allow(clippy::unwrap_used)]

use platform::mocks::{MockDac, MockRegistry, RecordingNotifier, RegistryCall};
use platform::{
    ActorId, ActorState, DacAddress, DacChannel, DacCode, DacDriver, NotificationDuration, PowerPercent, ReferenceMode,
};
use power_actor::{ActorConfig, ActorError, ConfigurationError, PowerActor};

const CHANNEL: DacChannel = DacChannel::C;
const DELEGATE: ActorId = ActorId::new(7);

type Actor = PowerActor<MockDac, MockRegistry, RecordingNotifier>;

fn zeroing_actor() -> Actor {
    let config = ActorConfig::dac_zeroing(DacAddress::DEFAULT, CHANNEL, ReferenceMode::Internal2V048);
    PowerActor::init(config, MockDac::new(), MockRegistry::new(), RecordingNotifier::new()).unwrap()
}

fn delegated_actor() -> Actor {
    let config =
        ActorConfig::dac_zeroing(DacAddress::DEFAULT, CHANNEL, ReferenceMode::Vdd).delegated_to(DELEGATE);
    PowerActor::init(
        config,
        MockDac::new(),
        MockRegistry::new().with_actor(DELEGATE),
        RecordingNotifier::new(),
    )
    .unwrap()
}

fn percent(p: u8) -> PowerPercent {
    PowerPercent::try_new(p).unwrap()
}

#[test]
fn reference_points_map_to_expected_codes() {
    let mut actor = zeroing_actor();
    for (power, code) in [(0, 0), (50, 2047), (100, 4095)] {
        actor.on(None).unwrap();
        actor.set_power(percent(power)).unwrap();
        assert_eq!(actor.code().get(), code);
        assert_eq!(actor.read_back().unwrap().get(), code);
    }
}

#[test]
fn zeroing_off_reads_back_zero() {
    let mut actor = zeroing_actor();
    actor.on(Some(percent(80))).unwrap();
    actor.off().unwrap();
    assert_eq!(actor.read_back().unwrap(), DacCode::ZERO);
    // The stored power survives the off.
    assert_eq!(actor.power().get(), 80);
}

#[test]
fn zeroing_set_power_while_off_is_held_until_on() {
    let mut actor = zeroing_actor();
    actor.set_power(percent(25)).unwrap();
    assert_eq!(actor.read_back().unwrap(), DacCode::ZERO);

    actor.on(None).unwrap();
    assert_eq!(actor.read_back().unwrap().get(), 1023);
}

#[test]
fn delegated_off_switches_actor_and_keeps_channel() {
    let mut actor = delegated_actor();
    actor.on(Some(percent(60))).unwrap();
    let before = actor.read_back().unwrap();

    actor.off().unwrap();
    assert!(!actor.is_on());
    assert_eq!(actor.delegated_state().unwrap(), Some(ActorState::Off));

    let (mut dac, registry, _) = actor.release();
    assert_eq!(registry.calls(), &[RegistryCall::On(DELEGATE), RegistryCall::Off(DELEGATE)]);
    assert!(dac.writes().iter().all(|(_, code)| *code != DacCode::ZERO));
    assert_eq!(dac.get_value(CHANNEL).unwrap(), before);
}

#[test]
fn delegated_set_power_writes_while_off() {
    let mut actor = delegated_actor();
    actor.set_power(percent(10)).unwrap();
    assert!(!actor.is_on());
    assert_eq!(actor.read_back().unwrap().get(), 409);
}

#[test]
fn on_off_on_restores_the_first_code() {
    let mut actor = zeroing_actor();
    actor.on(Some(percent(33))).unwrap();
    let first = actor.read_back().unwrap();
    actor.off().unwrap();
    actor.on(None).unwrap();
    assert_eq!(actor.read_back().unwrap(), first);
}

#[test]
fn repeated_off_matches_single_off() {
    let mut once = zeroing_actor();
    once.on(Some(percent(70))).unwrap();
    once.off().unwrap();

    let mut twice = zeroing_actor();
    twice.on(Some(percent(70))).unwrap();
    twice.off().unwrap();
    twice.off().unwrap();

    assert_eq!(once.state(), twice.state());
    assert_eq!(once.power(), twice.power());
    assert_eq!(once.read_back().unwrap(), twice.read_back().unwrap());
}

#[test]
fn repeated_delegated_off_is_harmless() {
    let mut actor = delegated_actor();
    actor.off().unwrap();
    actor.off().unwrap();
    assert_eq!(actor.delegated_state().unwrap(), Some(ActorState::Off));
}

#[test]
fn every_on_rewrites_hardware() {
    let mut actor = zeroing_actor();
    actor.on(Some(percent(50))).unwrap();
    actor.on(None).unwrap();
    let (dac, _, _) = actor.release();
    let writes: Vec<u16> = dac.writes().iter().map(|(_, code)| code.get()).collect();
    assert_eq!(writes, [0, 2047, 2047]);
}

#[test]
fn delegated_on_with_power_writes_it_before_switching() {
    let mut actor = delegated_actor();
    actor.set_power(percent(90)).unwrap();
    actor.on(Some(percent(10))).unwrap();
    assert!(actor.is_on());
    assert_eq!(actor.power().get(), 10);

    let (dac, registry, _) = actor.release();
    let writes: Vec<u16> = dac.writes().iter().map(|(_, code)| code.get()).collect();
    assert_eq!(writes, [3685, 409, 409]);
    assert_eq!(registry.calls(), &[RegistryCall::On(DELEGATE)]);
}

#[test]
fn rejected_delegated_on_keeps_actor_off_with_new_power_written() {
    let config =
        ActorConfig::dac_zeroing(DacAddress::DEFAULT, CHANNEL, ReferenceMode::Vdd).delegated_to(DELEGATE);
    let mut registry = MockRegistry::new().with_actor(DELEGATE);
    registry.reject_switching(true);
    let mut actor = PowerActor::init(config, MockDac::new(), registry, RecordingNotifier::new()).unwrap();

    let err = actor.on(Some(percent(50))).unwrap_err();
    assert_eq!(err, ActorError::Configuration(ConfigurationError::DelegateRejected(DELEGATE)));
    assert!(!actor.is_on());
    assert_eq!(actor.power().get(), 50);
    assert_eq!(actor.delegated_state().unwrap(), Some(ActorState::Off));

    let (dac, _, _) = actor.release();
    // Only the set_power write; the post-switch write never happened.
    let writes: Vec<u16> = dac.writes().iter().map(|(_, code)| code.get()).collect();
    assert_eq!(writes, [2047]);
}

#[test]
fn read_back_banner_follows_each_write() {
    let mut actor = zeroing_actor();
    actor.on(Some(percent(100))).unwrap();
    let (_, _, notifier) = actor.release();
    assert_eq!(notifier.last_headline(), "MCP4728 Channel 2 Value 4095");
    assert_eq!(
        notifier.last_duration(),
        Some(NotificationDuration::from_millis(platform::config::DEFAULT_NOTIFICATION_MS))
    );
}

#[test]
fn unreachable_bus_fails_init_without_retry() {
    let mut actor = zeroing_actor();
    actor.on(Some(percent(40))).unwrap();
    let (mut dac, registry, notifier) = actor.release();
    dac.fail_with(platform::BusErrorKind::ArbitrationLoss);
    dac.clear_log();

    let config = ActorConfig::dac_zeroing(DacAddress::DEFAULT, CHANNEL, ReferenceMode::Internal2V048);
    let err = PowerActor::init(config, dac, registry, notifier).unwrap_err();
    assert!(err.is_device());
    assert!(err.to_string().contains("arbitration"));
}
