//! Apply scenarios against the in-memory host

use std::sync::Arc;

use crate::actions::{AUTH_TYPE_CUSTOM, AUTH_TYPE_NONE, PatchContext};
use crate::actions::pure::steam_id_from_hex;
use crate::config::SpoofIdentity;
use crate::host::memory::{
    MemoryInterceptor, MemoryModel, MemoryModule, MemoryObject, MemoryType, getter_id, method_id,
    setter_id,
};
use crate::host::{HostObject, ObjectModel, ObjectRef, TypeRef, Value, Visibility};

use super::{Patcher, PatchOutcome, PatchSpec};

const SPOOFED_ID: u64 = 76561198000000002;

fn identity() -> SpoofIdentity {
    SpoofIdentity {
        player_index: 1,
        steam_id: SPOOFED_ID,
        account_name: "Player 2".to_string(),
    }
}

struct Host {
    steam_manager: TypeRef,
    steam_client: TypeRef,
    photon: TypeRef,
    model: Arc<dyn ObjectModel>,
    interceptor: MemoryInterceptor,
}

fn host() -> Host {
    let object = MemoryType::root("System.Object").build();
    let behaviour = MemoryType::new("UnityEngine.MonoBehaviour")
        .with_base(&object)
        .with_method("Awake", Visibility::Private, false)
        .build();
    let steam_manager = MemoryType::new("SteamManager")
        .with_base(&behaviour)
        .with_method("DoSteam", Visibility::Private, false)
        .with_method("Quit", Visibility::Public, false)
        .with_method("GetSteamAuthTicket", Visibility::Public, false)
        .with_field("steamLoaded", "Boolean", Visibility::Private, false)
        .with_field("steamId", "SteamId", Visibility::Private, false)
        .with_field("steamName", "String", Visibility::Private, false)
        .build();
    let steam_client = MemoryType::new("Steamworks.SteamClient")
        .with_property("IsValid", "Boolean", true, false, true)
        .with_property("SteamId", "SteamId", true, false, true)
        .build();
    let photon = MemoryType::new("Photon.Pun.PhotonNetwork")
        .with_property("AuthValues", "AuthenticationValues", true, true, true)
        .build();

    let model = MemoryModel::new()
        .with_module(MemoryModule::refusing("Broken.dll", "bad metadata").build())
        .with_module(MemoryModule::faulting("Obfuscated.dll", "bad image").build())
        .with_module(
            MemoryModule::new("Assembly-CSharp.dll")
                .with_type(&behaviour)
                .with_type(&steam_manager)
                .build(),
        )
        .with_module(
            MemoryModule::new("Facepunch.Steamworks.dll")
                .with_type(&steam_client)
                .build(),
        )
        .with_module(MemoryModule::new("PhotonUnityNetworking.dll").with_type(&photon).build());

    Host {
        steam_manager,
        steam_client,
        photon,
        model: Arc::new(model),
        interceptor: MemoryInterceptor::new(),
    }
}

fn patcher(host: &Host, ctx: PatchContext) -> Patcher {
    Patcher::new(
        Arc::clone(&host.model),
        Box::new(host.interceptor.clone()),
        Arc::new(ctx),
    )
}

fn steam_manager_instance() -> ObjectRef {
    Arc::new(
        MemoryObject::new("SteamManager")
            .with_field("steamLoaded", Value::Bool(false))
            .with_field("steamId", Value::UInt(1))
            .with_field("steamName", Value::from("real")),
    )
}

// ── orchestration ──

#[test]
fn missing_class_does_not_stop_batch() {
    let host = host();
    let mut patcher = patcher(&host, PatchContext::new(identity()));
    let specs = [
        PatchSpec::method("Foo", "Bar", "skip"),
        PatchSpec::method("SteamManager", "Quit", "skip"),
    ];
    let report = patcher.apply_all(&specs);

    assert_eq!(report.outcome(&specs[0]), Some(&PatchOutcome::TypeNotFound));
    assert_eq!(report.outcome(&specs[1]), Some(&PatchOutcome::Applied));
    let quit = method_id(&host.steam_manager, "Quit").unwrap();
    assert_eq!(host.interceptor.hook_count(quit), 1);
    assert_eq!(host.interceptor.hooked_targets(), 1);
}

#[test]
fn faulting_module_does_not_fail_apply() {
    let host = host();
    let mut patcher = patcher(&host, PatchContext::new(identity()));
    let spec = PatchSpec::method("SteamManager", "Quit", "skip");
    let report = patcher.apply_all(std::slice::from_ref(&spec));
    assert_eq!(report.outcome(&spec), Some(&PatchOutcome::Applied));
}

#[test]
fn missing_member_and_unknown_action() {
    let host = host();
    let mut patcher = patcher(&host, PatchContext::new(identity()));
    assert_eq!(
        patcher.apply(&PatchSpec::method("SteamManager", "NoSuchMethod", "skip")),
        PatchOutcome::MemberNotFound
    );
    assert_eq!(
        patcher.apply(&PatchSpec::method("SteamManager", "Quit", "make_coffee")),
        PatchOutcome::UnknownAction
    );
    assert_eq!(host.interceptor.hooked_targets(), 0);
}

#[test]
fn applying_twice_binds_once() {
    let host = host();
    let mut patcher = patcher(&host, PatchContext::new(identity()));
    let spec = PatchSpec::method("SteamManager", "Quit", "skip");
    assert_eq!(patcher.apply(&spec), PatchOutcome::Applied);
    assert_eq!(patcher.apply(&spec), PatchOutcome::AlreadyApplied);

    let quit = method_id(&host.steam_manager, "Quit").unwrap();
    assert_eq!(host.interceptor.hook_count(quit), 1);
}

#[test]
fn different_actions_stack_on_one_callable() {
    let host = host();
    let mut patcher = patcher(&host, PatchContext::new(identity()));
    patcher.apply(&PatchSpec::method("SteamManager", "Quit", "log_call"));
    patcher.apply(&PatchSpec::method("SteamManager", "Quit", "skip"));

    let quit = method_id(&host.steam_manager, "Quit").unwrap();
    assert_eq!(host.interceptor.hook_count(quit), 2);
    assert_eq!(patcher.applied_count(), 2);
}

#[test]
fn inherited_method_binds_on_base_type() {
    let host = host();
    let mut patcher = patcher(&host, PatchContext::new(identity()));
    let outcome = patcher.apply(&PatchSpec::method("SteamManager", "Awake", "log_call"));
    assert_eq!(outcome, PatchOutcome::Applied);
    assert_eq!(host.interceptor.hooked_targets(), 1);
}

#[test]
fn unpatch_all_clears_hooks() {
    let host = host();
    let mut patcher = patcher(&host, PatchContext::new(identity()));
    patcher.apply(&PatchSpec::method("SteamManager", "Quit", "skip"));
    patcher.unpatch_all();
    assert_eq!(host.interceptor.hooked_targets(), 0);
    assert_eq!(patcher.applied_count(), 0);

    // re-applying after teardown installs again
    assert_eq!(
        patcher.apply(&PatchSpec::method("SteamManager", "Quit", "skip")),
        PatchOutcome::Applied
    );
}

#[test]
fn drop_uninstalls() {
    let host = host();
    {
        let mut patcher = patcher(&host, PatchContext::new(identity()));
        patcher.apply(&PatchSpec::method("SteamManager", "Quit", "skip"));
        assert_eq!(host.interceptor.hooked_targets(), 1);
    }
    assert_eq!(host.interceptor.hooked_targets(), 0);
}

// ── hook behavior through the interceptor ──

#[test]
fn skip_suppresses_original_side_effects() {
    let host = host();
    let mut patcher = patcher(&host, PatchContext::new(identity()));
    patcher.apply(&PatchSpec::method("SteamManager", "Quit", "skip"));

    let instance = steam_manager_instance();
    let quit = method_id(&host.steam_manager, "Quit").unwrap();
    let result = host.interceptor.invoke(quit, Some(&instance), &mut [], |inst, _| {
        if let Some(inst) = inst {
            let _ = inst.set_field("steamName", Value::from("quit ran"));
        }
        Value::from("original result")
    });
    assert_eq!(instance.field("steamName"), Some(Value::from("real")));
    // the caller gets the pre-filled slot, not the original's value
    assert_eq!(result, Value::Null);
}

#[test]
fn force_true_overrides_getter() {
    let host = host();
    let mut patcher = patcher(&host, PatchContext::new(identity()));
    patcher.apply(&PatchSpec::property("Steamworks.SteamClient", "IsValid", "force_true"));

    let id = getter_id(&host.steam_client, "IsValid").unwrap();
    let result = host
        .interceptor
        .invoke(id, None, &mut [], |_, _| Value::Bool(false));
    assert_eq!(result, Value::Bool(true));
}

#[test]
fn force_steam_loaded_after_init() {
    let host = host();
    let mut patcher = patcher(&host, PatchContext::new(identity()));
    patcher.apply(&PatchSpec::method("SteamManager", "DoSteam", "force_steam_loaded"));

    let instance = steam_manager_instance();
    let id = method_id(&host.steam_manager, "DoSteam").unwrap();
    host.interceptor.invoke(id, Some(&instance), &mut [], |_, _| Value::Null);

    assert_eq!(instance.field("steamLoaded"), Some(Value::Bool(true)));
    assert_eq!(instance.field("steamId"), Some(Value::UInt(SPOOFED_ID)));
    assert_eq!(instance.field("steamName"), Some(Value::from("Player 2")));
}

#[test]
fn fake_ticket_is_stable_and_decodes() {
    let host = host();
    let mut patcher = patcher(&host, PatchContext::new(identity()));
    patcher.apply(&PatchSpec::method("SteamManager", "GetSteamAuthTicket", "fake_auth_ticket"));

    let id = method_id(&host.steam_manager, "GetSteamAuthTicket").unwrap();
    let call = || {
        host.interceptor
            .invoke(id, None, &mut [], |_, _| Value::from("real ticket"))
    };
    let first = call();
    let second = call();
    assert_eq!(first, second);
    assert_eq!(steam_id_from_hex(first.as_str().unwrap()), Some(SPOOFED_ID));
}

#[test]
fn photon_credentials_rewritten_before_setter() {
    let host = host();
    let mut patcher = patcher(&host, PatchContext::new(identity()));
    let spec = PatchSpec::setter("PhotonNetwork", "AuthValues", "photon_auth_none");
    let outcome = patcher.apply(&spec);
    assert_eq!(outcome, PatchOutcome::Applied);

    let id = setter_id(&host.photon, "AuthValues").unwrap();
    let mut seen = Vec::new();
    for _ in 0..2 {
        let creds: ObjectRef = Arc::new(
            MemoryObject::new("AuthenticationValues")
                .with_property("UserId", Value::from("steam-user"))
                .with_property("AuthType", Value::Byte(AUTH_TYPE_CUSTOM)),
        );
        let mut args = [Value::Object(Arc::clone(&creds))];
        host.interceptor.invoke(id, None, &mut args, |_, _| Value::Null);
        assert_eq!(creds.property("AuthType"), Some(Value::Byte(AUTH_TYPE_NONE)));
        seen.push(creds.property("UserId"));
    }
    assert_eq!(seen[0], seen[1]);
    assert_eq!(
        seen[0],
        Some(Value::from(patcher.context().photon_user_id()))
    );
}

#[test]
fn passthrough_context_changes_nothing() {
    let host = host();
    let mut patcher = patcher(&host, PatchContext::passthrough());
    patcher.apply(&PatchSpec::method("SteamManager", "Quit", "skip"));
    patcher.apply(&PatchSpec::property("Steamworks.SteamClient", "IsValid", "force_true"));

    let instance = steam_manager_instance();
    let quit = method_id(&host.steam_manager, "Quit").unwrap();
    let ran = host
        .interceptor
        .invoke(quit, Some(&instance), &mut [], |_, _| Value::from("ran"));
    assert_eq!(ran, Value::from("ran"));

    let valid = getter_id(&host.steam_client, "IsValid").unwrap();
    let result = host
        .interceptor
        .invoke(valid, None, &mut [], |_, _| Value::Bool(false));
    assert_eq!(result, Value::Bool(false));
}

#[test]
fn faulting_hook_does_not_reach_caller() {
    let host = host();
    let mut patcher = patcher(&host, PatchContext::new(identity()));
    // force_true on a non-bool getter faults inside the hook
    patcher.apply(&PatchSpec::property("Steamworks.SteamClient", "SteamId", "force_true"));

    let id = getter_id(&host.steam_client, "SteamId").unwrap();
    let result = host
        .interceptor
        .invoke(id, None, &mut [], |_, _| Value::from("not a bool"));
    assert_eq!(result, Value::from("not a bool"));
}
