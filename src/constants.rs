//! Fixed names and descriptors used by the transformer.
//!
//! Every string here is part of the ABI shared with the runtime tracking library
//! (`com.shalan.analytics.core`): implementers must reproduce them exactly, byte for byte, since
//! they are written into the constant pool of every instrumented class.

/// Immediate superclasses that classify a class as `Activity`-kind.
pub const ACTIVITY_SUPERS: &[&str] = &[
    "android/app/Activity",
    "androidx/appcompat/app/AppCompatActivity",
    "androidx/fragment/app/FragmentActivity",
];

/// Immediate superclasses that classify a class as `Fragment`-kind.
pub const FRAGMENT_SUPERS: &[&str] = &["android/app/Fragment", "androidx/fragment/app/Fragment"];

/// Descriptor of the `@TrackScreen` annotation.
pub const TRACK_SCREEN_DESCRIPTOR: &str = "Lcom/shalan/analytics/annotation/TrackScreen;";

/// Descriptor of the `@Trackable` annotation.
pub const TRACKABLE_DESCRIPTOR: &str = "Lcom/shalan/analytics/annotation/Trackable;";

/// Descriptor of the `@Track` annotation.
pub const TRACK_DESCRIPTOR: &str = "Lcom/shalan/analytics/annotation/Track;";

/// Descriptor of the `@Param` annotation.
pub const PARAM_DESCRIPTOR: &str = "Lcom/shalan/analytics/annotation/Param;";

/// Name of the Activity lifecycle method that is instrumented.
pub const ACTIVITY_METHOD_NAME: &str = "onCreate";
/// Descriptor of the Activity lifecycle method that is instrumented.
pub const ACTIVITY_METHOD_DESCRIPTOR: &str = "(Landroid/os/Bundle;)V";

/// Name of the Fragment lifecycle method that is instrumented.
pub const FRAGMENT_METHOD_NAME: &str = "onViewCreated";
/// Descriptor of the Fragment lifecycle method that is instrumented.
pub const FRAGMENT_METHOD_DESCRIPTOR: &str = "(Landroid/view/View;Landroid/os/Bundle;)V";

/// Name of the synthesized screen-tracking helper method.
pub const HELPER_METHOD_NAME: &str = "__injectAnalyticsTracking";
/// Descriptor of the synthesized screen-tracking helper method.
pub const HELPER_METHOD_DESCRIPTOR: &str = "()V";

/// Internal name of the runtime class that receives the screen-tracking call.
pub const TRACK_SCREEN_HELPER_CLASS: &str = "com/shalan/analytics/core/TrackScreenHelper";
/// Name of the method invoked on [`TRACK_SCREEN_HELPER_CLASS`].
pub const TRACK_SCREEN_HELPER_METHOD: &str = "trackScreen";
/// Descriptor of the method invoked on [`TRACK_SCREEN_HELPER_CLASS`].
pub const TRACK_SCREEN_HELPER_DESCRIPTOR: &str =
    "(Ljava/lang/Object;Ljava/lang/String;Ljava/lang/String;)V";

/// Internal name of the runtime class that receives the `@Track` call.
pub const METHOD_TRACKING_MANAGER_CLASS: &str = "com/shalan/analytics/core/MethodTrackingManager";
/// Name of the method invoked on [`METHOD_TRACKING_MANAGER_CLASS`].
pub const METHOD_TRACKING_MANAGER_METHOD: &str = "track";
/// Descriptor of the method invoked on [`METHOD_TRACKING_MANAGER_CLASS`].
pub const METHOD_TRACKING_MANAGER_DESCRIPTOR: &str =
    "(Ljava/lang/String;Ljava/util/Map;Z)V";

/// Dotted-name prefixes that are never instrumentation candidates, regardless of configuration.
pub const SYSTEM_PACKAGE_PREFIXES: &[&str] = &["android.", "androidx.", "java.", "kotlin."];

/// Default cap on the number of `@Param`-tagged parameters captured per `@Track` method.
pub const DEFAULT_MAX_PARAMETERS_PER_METHOD: usize = 10;

/// Lifecycle suffixes stripped from a class's simple name to derive a default screen name.
pub const SCREEN_NAME_SUFFIXES: &[&str] = &["Activity", "Fragment", "Screen"];

/// Internal name of `java.util.HashMap`, used to materialize the `@Track` parameter map.
pub const HASH_MAP_CLASS: &str = "java/util/HashMap";
/// Internal name of `java.util.Map`, the interface the `put` call targets.
pub const MAP_INTERFACE: &str = "java/util/Map";
/// Internal name of `java.util.Collections`, used for the zero-parameter fast path.
pub const COLLECTIONS_CLASS: &str = "java/util/Collections";
/// Name of the method used to obtain an immutable empty map.
pub const EMPTY_MAP_METHOD: &str = "emptyMap";
/// Descriptor of [`EMPTY_MAP_METHOD`].
pub const EMPTY_MAP_DESCRIPTOR: &str = "()Ljava/util/Map;";
