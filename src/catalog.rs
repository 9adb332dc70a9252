//! Builtin rule table: the canned guidance scenarios and the fallback.
//!
//! Templates are data, not code branches. Adding a scenario means appending
//! a `.rule(...)` registration here; rule order decides priority.

use crate::rules::{Resolver, ResponseTemplate};
use crate::schema::{CodeSnippet, Subtask};

/// Build the process-wide resolver with the builtin scenarios registered in
/// priority order.
pub fn builtin() -> Resolver {
    Resolver::new(fallback())
        .rule(&["teleport", "unity"], unity_teleport())
        .rule(&["multiplayer", "unreal"], unreal_multiplayer())
        .rule(&["shader", "occlusion"], shader_occlusion())
}

fn unity_teleport() -> ResponseTemplate {
    ResponseTemplate {
        category: "Unity".to_string(),
        difficulty: "Intermediate".to_string(),
        subtasks: vec![
            Subtask::new(
                "Install the Unity XR Interaction Toolkit",
                "Use the Package Manager to add the XR Interaction Toolkit.",
            ),
            Subtask::new(
                "Create a Teleportation Area",
                "Add a 'Teleportation Area' component to the floor/ground plane.",
            ),
            Subtask::new(
                "Set up the XR Rig",
                "Ensure your XR Rig has a 'Teleportation Provider' component.",
            ),
            Subtask::new(
                "Configure Controller Actions",
                "Map a controller button to the 'Teleport' action in the Input Action Asset.",
            ),
        ],
        code_snippet: CodeSnippet::new(
            "csharp",
            r#"// Attach this script to your XR Rig to enable teleportation requests.
using UnityEngine;
using UnityEngine.InputSystem;
using UnityEngine.XR.Interaction.Toolkit;

public class TeleportController : MonoBehaviour
{
    public InputActionAsset actionAsset;
    public TeleportationProvider provider;

    private InputAction _thumbstick;
    private TeleportRequest _request = new TeleportRequest();

    void Start()
    {
        // Ensure the provider is assigned in the Inspector
        if (provider == null) provider = GetComponent<TeleportationProvider>();

        var activate = actionAsset.FindActionMap("XRI RightHand Locomotion").FindAction("Teleport Mode Activate");
        activate.Enable();
        activate.performed += OnTeleportActivate;

        var cancel = actionAsset.FindActionMap("XRI RightHand Locomotion").FindAction("Teleport Mode Cancel");
        cancel.Enable();
        cancel.performed += OnTeleportCancel;
    }

    private void OnTeleportActivate(InputAction.CallbackContext context) { /* Logic to show ray */ }
    private void OnTeleportCancel(InputAction.CallbackContext context) { /* Logic to hide ray and teleport */ }
}"#,
        ),
        best_practices: vec![
            "Use Teleportation Anchors for specific teleport points, not just large areas."
                .to_string(),
            "Ensure your floor/ground objects are on a layer that the XR Ray Interactor can hit."
                .to_string(),
            "A 'NullReferenceException' often means the TeleportationProvider is not assigned in the Inspector."
                .to_string(),
        ],
        documentation_link:
            "https://docs.unity3d.com/Packages/com.unity.xr.interaction.toolkit@2.5/manual/locomotion.html"
                .to_string(),
    }
}

fn unreal_multiplayer() -> ResponseTemplate {
    ResponseTemplate {
        category: "Unreal".to_string(),
        difficulty: "Advanced".to_string(),
        subtasks: vec![
            Subtask::new(
                "Enable a Networking Plugin",
                "Activate 'Online Subsystem' and a specific platform plugin (e.g., 'OnlineSubsystemSteam').",
            ),
            Subtask::new(
                "Replicate VR Pawn and Actors",
                "Set the 'Replicates' flag to true on your VRPawn and any networked objects.",
            ),
            Subtask::new(
                "Replicate Movement",
                "Use RPCs (Remote Procedure Calls) like 'Server_Move' and 'Multicast_Move' to sync player position.",
            ),
            Subtask::new(
                "Set up a Game Session",
                "Use the Online Session Interface to create, find, and join multiplayer sessions.",
            ),
        ],
        code_snippet: CodeSnippet::new(
            "cpp",
            r#"// Example of a replicated function in your character's header file
UCLASS()
class YOURGAME_API AVRCharacter : public ACharacter
{
    GENERATED_BODY()

public:
    // This function is called on the server
    UFUNCTION(Server, Reliable, WithValidation)
    void Server_SomeAction();

    // This function is called on all clients
    UFUNCTION(NetMulticast, Reliable)
    void Multicast_SomeEffect();

    // Must override this for replicated properties
    virtual void GetLifetimeReplicatedProps(TArray<FLifetimeProperty>& OutLifetimeProps) const override;

protected:
    // Replicated property
    UPROPERTY(Replicated)
    float Health;
};"#,
        ),
        best_practices: vec![
            "Only replicate what's necessary to save bandwidth.".to_string(),
            "Avoid running complex logic in 'tick' functions for networked actors.".to_string(),
            "Use 'Replication Conditions' (e.g., COND_OwnerOnly) to control when and to whom properties are sent."
                .to_string(),
        ],
        documentation_link:
            "https://docs.unrealengine.com/5.3/en-US/multiplayer-and-networking-in-unreal-engine/"
                .to_string(),
    }
}

fn shader_occlusion() -> ResponseTemplate {
    ResponseTemplate {
        category: "Shader".to_string(),
        difficulty: "Intermediate".to_string(),
        subtasks: vec![
            Subtask::new(
                "Understand Occlusion Shaders",
                "An occlusion shader makes objects invisible but still hides objects behind them. It doesn't write color, only depth.",
            ),
            Subtask::new(
                "Create a New Shader Graph or File",
                "In Unity or Unreal, create a new shader asset.",
            ),
            Subtask::new(
                "Configure the Shader Properties",
                "Set the 'Render Queue' to be earlier than your normal geometry and disable color/alpha writes.",
            ),
            Subtask::new(
                "Apply the Material",
                "Create a material from the shader and apply it to the geometry that should occlude (e.g., a model of a table).",
            ),
        ],
        code_snippet: CodeSnippet::new(
            "hlsl",
            r#"// A minimal Unity URP shader for occlusion.
Shader "Unlit/OcclusionShader"
{
    Properties
    {
    }
    SubShader
    {
        Tags { "RenderType"="Opaque" "Queue"="Geometry-10" }
        LOD 100
        Pass
        {
            ColorMask 0 // Don't write to any color channels
            ZWrite On   // Write to the depth buffer
        }
    }
}"#,
        ),
        best_practices: vec![
            "The key to occlusion is `ColorMask 0`. This prevents the occluder from being visible."
                .to_string(),
            "Make sure the occluder geometry matches the real-world object as closely as possible for convincing AR."
                .to_string(),
            "This technique works best when the AR platform provides a mesh of the real-world environment."
                .to_string(),
        ],
        documentation_link: "https://docs.unity3d.com/Manual/SL-SubShaderTags.html".to_string(),
    }
}

fn fallback() -> ResponseTemplate {
    ResponseTemplate {
        category: "General".to_string(),
        difficulty: "N/A".to_string(),
        subtasks: vec![Subtask::new(
            "Query not recognized",
            "This assistant only supports a fixed set of AR/VR scenarios. Please try one of them.",
        )],
        code_snippet: CodeSnippet::new("text", "No code to display."),
        best_practices: vec![
            "Try asking: 'How do I add teleport locomotion in Unity VR?'".to_string(),
        ],
        documentation_link: String::new(),
    }
}
