pub const NAV: &str = "fixed top-0 z-50 w-full bg-white/60 dark:bg-gray-700/60 backdrop-blur-md border-b border-gray-200/50 dark:border-gray-700/50";
pub const NAV_INNER: &str = "w-full h-16 px-4 sm:px-6 lg:px-8";
pub const NAV_CONTENT: &str = "h-full flex items-center justify-between";
pub const NAV_BRAND: &str = "flex items-center text-xl font-bold text-gray-900 dark:text-white hover:text-blue-600 dark:hover:text-blue-400 transition-colors duration-200";
pub const NAV_ITEMS: &str = "flex items-center space-x-4";
pub const NAV_LINK: &str = "relative px-3 py-2 text-sm font-medium text-gray-700 dark:text-gray-300 hover:text-blue-600 dark:hover:text-blue-400 transition-all duration-200";
pub const CARD: &str = "bg-white dark:bg-gray-800 rounded-lg shadow-lg dark:shadow-[0_4px_12px_-4px_rgba(255,255,255,0.03)] p-6";
pub const BUTTON_PRIMARY: &str = "inline-flex items-center justify-center px-4 py-2 rounded-lg font-medium text-white bg-gradient-to-r from-blue-600 to-blue-700 hover:from-blue-700 hover:to-blue-800 shadow-lg transition-all duration-300 disabled:opacity-50 disabled:cursor-not-allowed";
pub const BUTTON_SECONDARY: &str = "inline-flex items-center justify-center px-4 py-2 rounded-lg font-medium border border-gray-300 dark:border-gray-600 text-gray-900 dark:text-white hover:bg-gray-50 dark:hover:bg-gray-800";
pub const INPUT: &str = "mt-2 block w-full rounded-lg border-0 bg-white dark:bg-gray-900 py-2 px-3 text-gray-900 dark:text-white shadow-sm ring-1 ring-inset ring-gray-300 dark:ring-gray-700 placeholder:text-gray-400 focus:ring-2 focus:ring-blue-600";
pub const INPUT_ERROR: &str = "mt-2 block w-full rounded-lg border-0 bg-white dark:bg-gray-900 py-2 px-3 text-gray-900 dark:text-white shadow-sm ring-2 ring-inset ring-red-500 focus:ring-2 focus:ring-inset focus:ring-red-500 sm:text-sm";
pub const FORM: &str = "mt-4 space-y-4";
pub const TEXT_H1: &str = "text-3xl font-bold text-gray-900 dark:text-white";
pub const TEXT_H2: &str = "text-2xl font-bold text-gray-900 dark:text-white";
pub const TEXT_BODY: &str = "text-gray-600 dark:text-gray-300";
pub const TEXT_ERROR: &str = "text-sm text-red-500 dark:text-red-400";
pub const TEXT_LABEL: &str = "block text-sm font-medium text-gray-900 dark:text-white";
pub const TEXT_HINT: &str = "text-xs text-gray-500 dark:text-gray-400 mt-1";
pub const ALERT_SUCCESS: &str = "bg-green-50 dark:bg-green-900/50 border border-green-200 dark:border-green-800 rounded-lg p-4 text-green-700 dark:text-green-200";
pub const ALERT_ERROR: &str = "bg-red-50 dark:bg-red-900/50 border border-red-200 dark:border-red-800 rounded-lg p-4 text-red-700 dark:text-red-200";

// Slot machine
pub const SLOT_CABINET: &str = "bg-white dark:bg-gray-800 p-6 sm:p-8 rounded-2xl shadow-xl max-w-2xl mx-auto border border-gray-100 dark:border-gray-700 backdrop-blur-sm";
pub const REEL_WINDOW: &str = "flex justify-center gap-3 sm:gap-4 p-4 rounded-xl bg-gray-900 border-4 border-yellow-500 shadow-inner";
pub const REEL: &str = "w-20 h-24 sm:w-28 sm:h-32 flex items-center justify-center rounded-lg bg-white dark:bg-gray-100 text-5xl sm:text-6xl select-none transition-transform duration-100";
pub const REEL_SPINNING: &str = "blur-[1px] animate-pulse";
pub const REEL_WINNING: &str = "ring-4 ring-yellow-400 animate-bounce";
pub const BALANCE_BADGE: &str = "inline-flex items-center px-4 py-1 rounded-full bg-yellow-100 dark:bg-yellow-900/40 text-yellow-800 dark:text-yellow-200 font-semibold";
